//! Free-text message routing.

use std::fmt;

/// What a free-text message asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    Alignment,
    Indicators,
    Agencies,
    /// No analysis matched; the message is completed as-is.
    General,
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Intent::Alignment => "alignment",
            Intent::Indicators => "indicators",
            Intent::Agencies => "agencies",
            Intent::General => "general",
        };
        f.write_str(name)
    }
}

/// Maps a message to an [`Intent`].
pub trait IntentClassifier: Send + Sync {
    fn classify(&self, message: &str) -> Intent;
}

impl<F> IntentClassifier for F
where
    F: Fn(&str) -> Intent + Send + Sync,
{
    fn classify(&self, message: &str) -> Intent {
        self(message)
    }
}

/// Case-insensitive substring routing; the first matching rule wins.
#[derive(Debug, Clone)]
pub struct KeywordRouter {
    rules: Vec<(Intent, Vec<String>)>,
}

impl KeywordRouter {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Append a rule. Keywords are matched lowercased.
    pub fn rule<I, S>(mut self, intent: Intent, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords = keywords
            .into_iter()
            .map(|k| k.as_ref().to_lowercase())
            .collect();
        self.rules.push((intent, keywords));
        self
    }

    pub fn rules(&self) -> &[(Intent, Vec<String>)] {
        &self.rules
    }
}

impl Default for KeywordRouter {
    /// Alignment, then indicators, then agencies.
    fn default() -> Self {
        Self::new()
            .rule(Intent::Alignment, ["analyze", "alignment", "sdg"])
            .rule(Intent::Indicators, ["indicator", "measure", "metric"])
            .rule(Intent::Agencies, ["agency", "agencies", "partner"])
    }
}

impl IntentClassifier for KeywordRouter {
    fn classify(&self, message: &str) -> Intent {
        let message = message.to_lowercase();
        self.rules
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| message.contains(k.as_str())))
            .map(|(intent, _)| *intent)
            .unwrap_or(Intent::General)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Please analyze our water project", Intent::Alignment)]
    #[case("How does this fit SDG 6?", Intent::Alignment)]
    #[case("Check ALIGNMENT with the goals", Intent::Alignment)]
    #[case("Which metrics should we track?", Intent::Indicators)]
    #[case("How do we measure impact?", Intent::Indicators)]
    #[case("Suggest an indicator", Intent::Indicators)]
    #[case("Which UN agencies could help?", Intent::Agencies)]
    #[case("Find a partner organisation", Intent::Agencies)]
    #[case("Hello there", Intent::General)]
    #[case("", Intent::General)]
    fn default_rules(#[case] message: &str, #[case] expected: Intent) {
        assert_eq!(KeywordRouter::default().classify(message), expected);
    }

    #[rstest]
    #[case("Which agency can measure SDG progress?", Intent::Alignment)]
    #[case("Which agency can measure progress?", Intent::Indicators)]
    fn earlier_rules_win(#[case] message: &str, #[case] expected: Intent) {
        assert_eq!(KeywordRouter::default().classify(message), expected);
    }

    #[test]
    fn custom_rules_and_closures() {
        let router = KeywordRouter::new().rule(Intent::Agencies, ["UNICEF"]);
        assert_eq!(router.classify("ask unicef"), Intent::Agencies);
        assert_eq!(router.classify("analyze this"), Intent::General);

        let always = |_: &str| Intent::Indicators;
        assert_eq!(always.classify("anything"), Intent::Indicators);
    }
}
