pub trait ExternalText {
    fn cleaned(&self) -> Self;

    /// Lower-cases `value` and turns ASCII punctuation into word breaks, so
    /// "T-Shirt," becomes "t shirt ".
    fn clean(&self, value: &str) -> String {
        value
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| if c.is_ascii_punctuation() { ' ' } else { c })
            .collect::<String>()
    }
}
