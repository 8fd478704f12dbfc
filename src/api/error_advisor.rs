use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

pub const UNKNOWN_VARIABLE_TIP: &str =
    "This variable is not considered valid. Make sure you used a valid variable.";
pub const GENERIC_SYNTAX_TIP: &str =
    "Make sure you're using proper syntax; check the diagnostic log for details.";

/// Advice derived from an evaluation failure message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdvisorOutcome {
    NoTip,
    Tip(String),
}

impl AdvisorOutcome {
    #[must_use]
    pub fn tip(&self) -> Option<&str> {
        match self {
            Self::NoTip => None,
            Self::Tip(text) => Some(text),
        }
    }
}

/// How a rule recognizes a failure message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageMatcher {
    Contains(String),
    Equals(String),
}

impl MessageMatcher {
    #[must_use]
    pub fn matches(&self, message: &str) -> bool {
        match self {
            Self::Contains(needle) => message.contains(needle.as_str()),
            Self::Equals(expected) => message == expected,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdviceRule {
    pub matcher: MessageMatcher,
    pub outcome: AdvisorOutcome,
}

impl AdviceRule {
    #[must_use]
    pub fn new(matcher: MessageMatcher, outcome: AdvisorOutcome) -> Self {
        Self { matcher, outcome }
    }
}

/// Ordered table of message patterns; the first matching rule decides.
///
/// Messages no rule matches get the fallback tip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorAdvisor {
    rules: SmallVec<[AdviceRule; 4]>,
    fallback: AdvisorOutcome,
}

impl ErrorAdvisor {
    /// Advisor without any rule, answering every message with `fallback`.
    #[must_use]
    pub fn with_fallback(fallback: AdvisorOutcome) -> Self {
        Self {
            rules: SmallVec::new(),
            fallback,
        }
    }

    /// Appends `rule` after the existing ones, ahead of the fallback.
    #[must_use]
    pub fn with_rule(mut self, rule: AdviceRule) -> Self {
        self.rules.push(rule);
        self
    }

    #[must_use]
    pub fn rules(&self) -> &[AdviceRule] {
        &self.rules
    }

    #[must_use]
    pub fn recommend(&self, message: &str) -> AdvisorOutcome {
        self.rules
            .iter()
            .find(|rule| rule.matcher.matches(message))
            .map_or_else(|| self.fallback.clone(), |rule| rule.outcome.clone())
    }
}

impl Default for ErrorAdvisor {
    fn default() -> Self {
        Self::with_fallback(AdvisorOutcome::Tip(GENERIC_SYNTAX_TIP.to_owned()))
            .with_rule(AdviceRule::new(
                MessageMatcher::Contains("unknown variable ".to_owned()),
                AdvisorOutcome::Tip(UNKNOWN_VARIABLE_TIP.to_owned()),
            ))
            .with_rule(AdviceRule::new(
                MessageMatcher::Equals("Factorials are unsupported".to_owned()),
                AdvisorOutcome::NoTip,
            ))
    }
}

#[cfg(test)]
mod tests {
    use super::{
        AdviceRule, AdvisorOutcome, ErrorAdvisor, GENERIC_SYNTAX_TIP, MessageMatcher,
        UNKNOWN_VARIABLE_TIP,
    };

    #[test]
    fn unknown_variable_gets_variable_tip() {
        let advisor = ErrorAdvisor::default();
        assert_eq!(
            advisor.recommend("Evaluation error: unknown variable x"),
            AdvisorOutcome::Tip(UNKNOWN_VARIABLE_TIP.to_owned())
        );
    }

    #[test]
    fn factorials_get_no_tip() {
        let advisor = ErrorAdvisor::default();
        assert_eq!(
            advisor.recommend("Factorials are unsupported"),
            AdvisorOutcome::NoTip
        );
    }

    #[test]
    fn factorial_match_is_exact() {
        let advisor = ErrorAdvisor::default();
        assert_eq!(
            advisor.recommend("Factorials are unsupported!"),
            AdvisorOutcome::Tip(GENERIC_SYNTAX_TIP.to_owned())
        );
    }

    #[test]
    fn anything_else_gets_syntax_tip() {
        let advisor = ErrorAdvisor::default();
        assert_eq!(
            advisor.recommend("garbage"),
            AdvisorOutcome::Tip(GENERIC_SYNTAX_TIP.to_owned())
        );
    }

    #[test]
    fn unknown_variable_rule_needs_trailing_space() {
        let advisor = ErrorAdvisor::default();
        assert_eq!(
            advisor.recommend("unknown variable"),
            AdvisorOutcome::Tip(GENERIC_SYNTAX_TIP.to_owned())
        );
    }

    #[test]
    fn added_rules_run_before_fallback_only() {
        let advisor = ErrorAdvisor::default().with_rule(AdviceRule::new(
            MessageMatcher::Contains("unknown".to_owned()),
            AdvisorOutcome::Tip("custom".to_owned()),
        ));
        assert_eq!(
            advisor.recommend("unknown function sinh"),
            AdvisorOutcome::Tip("custom".to_owned())
        );
        assert_eq!(
            advisor.recommend("unknown variable y"),
            AdvisorOutcome::Tip(UNKNOWN_VARIABLE_TIP.to_owned())
        );
    }
}
