//! Prompt assembly for the analyzer operations.
//!
//! Every prompt is sent as a single system-role message. The analysis prompt
//! defines the JSON layout that `NarrativeAnalysisResult` deserializes.

use crate::types::Article;

/// Render articles as `UniqueId/Title/Content` blocks separated by blank lines.
pub fn format_articles(articles: &[Article]) -> String {
    articles
        .iter()
        .map(|a| {
            format!(
                "UniqueId: {}\nTitle: {}\nContent: {}",
                a.unique_id, a.title, a.summary
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub fn analysis_prompt(research_question: &str, articles: &[Article]) -> String {
    let formatted = format_articles(articles);
    format!(
        r#"
Based on the research question: {research_question}, analyze the provided articles and return the results in JSON string format with the following fields:

articleAnalysis: An array of objects, each representing an analysis of one article. Each object should include:
- UniqueId: The id of the article.
- Title: The title of the article.
- Summary: A concise and comprehensive summary of the article.
- Narratives: A list and explanation of the main narratives presented in the article based on the research question. It should be returned as an array of objects.
- Dominance: A description of the dominance of each narrative within the article based on the research question. It should be returned as an array of objects.
- Evolution: An explanation of how the narrative has evolved over time, highlighting any changes in focus or perspective based on the research question. It should be a string.

statistics: Combine the findings from all articles to provide an overall analysis to visualize the top 5 narratives on a pie chart. It should be an array of exactly 5 objects, each containing the narrative and value with the keys in lowercase.

overallConclusion: Summarize the findings based on the narrative analysis and use it to answer the research question. Provide feedback on how well the identified narratives address the research question and how social media platforms critically influence these narratives over time. Highlight any gaps or areas for further investigation based on the narrative trends. It should be a string.

Ensure the results are short and concise, suitable for a social researcher to quickly understand and move on to the next article.

These are the articles: {formatted}
"#
    )
}

pub fn summary_prompt(text: &str) -> String {
    format!(
        "Generate a concise and comprehensive summary that can aid narrative analysis of the article in no more than 150 words: {}",
        text
    )
}

pub fn keyword_prompt(research_question: &str) -> String {
    format!(
        "Given the research question, {}, generate a keyword that can be used to query an API to fetch news and blog articles.",
        research_question
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(id: &str, title: &str, summary: &str) -> Article {
        Article {
            unique_id: id.into(),
            title: title.into(),
            summary: summary.into(),
        }
    }

    #[test]
    fn articles_joined_in_order_with_blank_lines() {
        let out = format_articles(&[article("1", "A", "first"), article("2", "B", "second")]);
        assert_eq!(
            out,
            "UniqueId: 1\nTitle: A\nContent: first\n\nUniqueId: 2\nTitle: B\nContent: second"
        );
    }

    #[test]
    fn no_articles_formats_empty() {
        assert_eq!(format_articles(&[]), "");
    }

    #[test]
    fn analysis_prompt_names_required_fields() {
        let p = analysis_prompt("Why?", &[article("7", "T", "S")]);
        assert!(p.contains("research question: Why?"));
        assert!(p.contains("articleAnalysis:"));
        assert!(p.contains("statistics:"));
        assert!(p.contains("exactly 5 objects"));
        assert!(p.contains("overallConclusion:"));
        assert!(p.contains("short and concise"));
        assert!(p.contains("UniqueId: 7\nTitle: T\nContent: S"));
    }

    #[test]
    fn summary_and_keyword_embed_input_verbatim() {
        assert!(summary_prompt("  body text ").ends_with(":   body text "));
        assert!(summary_prompt("x").contains("no more than 150 words"));
        assert!(keyword_prompt("What about floods?").contains("research question, What about floods?,"));
    }
}
