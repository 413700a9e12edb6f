// Word-level helpers shared by the transformers: whitespace word counts,
// punctuation-stripped tokenization and connector lookup

/// Connector phrases (접속사, 연결어) recognised in running text
pub const CONNECTORS: &[&str] = &[
    "그러나", "하지만", "그렇지만", "그런데", "근데",
    "그리고", "또한", "게다가", "더불어", "아울러",
    "따라서", "그래서", "그러므로", "결국", "결과적으로",
    "왜냐하면", "때문에", "이유는",
    "예를 들어", "예컨대", "가령",
    "즉", "다시 말해", "바꿔 말하면",
    "반면", "반대로", "오히려",
    "물론", "사실", "실제로", "어쨌든", "아무튼",
];

/// Number of whitespace-separated words
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Word count of every sentence, in order
pub fn sentence_lengths<S: AsRef<str>>(sentences: &[S]) -> Vec<usize> {
    sentences.iter().map(|s| word_count(s.as_ref())).collect()
}

/// Tokenize by replacing punctuation with spaces and splitting on whitespace.
/// Letters, digits and underscores (Hangul included) survive.
pub fn tokenize(text: &str) -> Vec<String> {
    let cleaned: String = text
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '_' || c.is_whitespace() { c } else { ' ' })
        .collect();
    cleaned.split_whitespace().map(str::to_string).collect()
}

/// Connectors from [`CONNECTORS`] that occur anywhere in the text, in table order
pub fn extract_connectors(text: &str) -> Vec<&'static str> {
    CONNECTORS.iter().copied().filter(|c| text.contains(c)).collect()
}
