//! Prompt templates for condensation and the market summary.

use crate::domain::CondensedArticle;

/// Word cap requested from the model (not verified on the response).
pub const CONDENSE_WORD_TARGET: usize = 350;

/// Fixed condensation instructions. `content` should already be truncated.
pub fn condense_prompt(title: &str, content: &str) -> String {
    format!(
        r#"Condense this news article to exactly {words} words or less while preserving all key information:

Title: {title}
Content: {content}

Requirements:
- Maximum {words} words
- Preserve all important facts and details
- Maintain the original tone and context
- Focus on the main story and key points
- Keep it readable and coherent
- Include any financial data, numbers, or specific details mentioned

Return only the condensed article text."#,
        words = CONDENSE_WORD_TARGET,
        title = title,
        content = content,
    )
}

/// Market summary over the numbered article blocks.
pub fn market_summary_prompt(ticker: &str, articles: &[CondensedArticle]) -> String {
    let mut blocks = String::new();
    for (i, article) in articles.iter().enumerate() {
        blocks.push_str(&format!("\n--- Article {} ---\n", i + 1));
        blocks.push_str(&format!("Title: {}\n", article.title));
        blocks.push_str(&format!("Content: {}\n", article.analysis_text()));
    }

    format!(
        r#"Based on the following news articles about {ticker}, generate a comprehensive market summary:

{blocks}

Please provide:
1. **Overall Market Sentiment** (Positive/Negative/Neutral)
2. **Key Themes** (3-5 main topics driving the news)
3. **Market Impact** (How these developments might affect {ticker} stock)
4. **Risk Factors** (Any potential concerns or challenges mentioned)
5. **Investment Outlook** (Short-term and medium-term perspective)

Format your response clearly with headers for each section. Be concise but comprehensive."#,
        ticker = ticker,
        blocks = blocks,
    )
}

/// Truncate to at most `max_chars` characters (char-boundary safe).
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
