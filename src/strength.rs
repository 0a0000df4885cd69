// src/strength.rs
//! Heuristic password strength scoring.
//!
//! The score is a coarse sum of length, character-class and pattern signals
//! clamped to 0..=8. The tier thresholds and crack-time labels are fixed
//! strings shown to users, not a computed time-to-crack.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const MAX_SCORE: u8 = 8;

const EMPTY_FEEDBACK: &str = "Enter a password to check its strength";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum StrengthTier {
    Weak,
    Fair,
    Good,
    Strong,
}

impl StrengthTier {
    pub fn from_score(score: u8) -> Self {
        match score {
            0..=2 => StrengthTier::Weak,
            3..=4 => StrengthTier::Fair,
            5..=6 => StrengthTier::Good,
            _ => StrengthTier::Strong,
        }
    }

    pub fn crack_time(self) -> &'static str {
        match self {
            StrengthTier::Weak => "instantly",
            StrengthTier::Fair => "3 weeks, 4 days",
            StrengthTier::Good => "5 years",
            StrengthTier::Strong => "centuries",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StrengthTier::Weak => "Weak",
            StrengthTier::Fair => "Fair",
            StrengthTier::Good => "Good",
            StrengthTier::Strong => "Strong",
        }
    }
}

impl std::fmt::Display for StrengthTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StrengthAssessment {
    /// Score from 0 to 8
    pub score: u8,
    /// Qualitative tier derived from the score
    pub tier: StrengthTier,
    /// Suggestions, in the order the checks ran
    pub feedback: Vec<String>,
    /// Illustrative crack-time label for the tier
    pub crack_time: String,
}

impl StrengthAssessment {
    fn from_parts(score: u8, feedback: Vec<String>) -> Self {
        let tier = StrengthTier::from_score(score);
        Self {
            score,
            tier,
            feedback,
            crack_time: tier.crack_time().to_string(),
        }
    }
}

/// Score `password`. Total: every input, including the empty string, gets an assessment.
pub fn assess_password(password: &str) -> StrengthAssessment {
    if password.is_empty() {
        return StrengthAssessment::from_parts(0, vec![EMPTY_FEEDBACK.to_string()]);
    }

    let chars: Vec<char> = password.chars().collect();
    let mut score: i32 = 0;
    let mut feedback = Vec::new();

    match chars.len() {
        0..=7 => {
            score += 1;
            feedback.push("Password is too short".to_string());
        }
        8..=11 => {
            score += 2;
            feedback.push("Increase length (16+ characters recommended)".to_string());
        }
        12..=15 => score += 3,
        _ => score += 4,
    }

    let classes = [
        (chars.iter().any(|c| c.is_ascii_uppercase()), "Add uppercase letters"),
        (chars.iter().any(|c| c.is_ascii_lowercase()), "Add lowercase letters"),
        (chars.iter().any(|c| c.is_ascii_digit()), "Add numbers"),
        (chars.iter().any(|c| !c.is_ascii_alphanumeric()), "Add symbols"),
    ];
    for (present, advice) in classes {
        if present {
            score += 1;
        } else {
            feedback.push(advice.to_string());
        }
    }

    if has_repeated_run(&chars) {
        score -= 1;
        feedback.push("Avoid repeated characters".to_string());
    }

    if has_sequential_run(&chars) {
        score -= 1;
        feedback.push("Avoid sequential patterns".to_string());
    }

    let score = score.clamp(0, MAX_SCORE as i32) as u8;
    StrengthAssessment::from_parts(score, feedback)
}

// Same character three or more times in a row.
fn has_repeated_run(chars: &[char]) -> bool {
    chars.windows(3).any(|w| w[0] == w[1] && w[1] == w[2])
}

// Three ascending letters (a..z, case-insensitive) or digits (0..9), e.g. "abc", "XyZ", "789".
fn has_sequential_run(chars: &[char]) -> bool {
    chars.windows(3).any(|w| {
        let run: Vec<char> = w.iter().map(|c| c.to_ascii_lowercase()).collect();
        let same_class = run.iter().all(|c| c.is_ascii_lowercase()) || run.iter().all(|c| c.is_ascii_digit());
        same_class && run[1] as u32 == run[0] as u32 + 1 && run[2] as u32 == run[1] as u32 + 1
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_password_bypasses_scoring() {
        let result = assess_password("");
        assert_eq!(result.score, 0);
        assert_eq!(result.tier, StrengthTier::Weak);
        assert_eq!(result.crack_time, "instantly");
        assert_eq!(result.feedback, vec!["Enter a password to check its strength".to_string()]);
    }

    #[test]
    fn lowercase_sequence_scores_below_mixed_classes() {
        let plain = assess_password("abcdefgh");
        let mixed = assess_password("abcdefgH1!");
        assert_eq!(plain.score, 2);
        assert_eq!(mixed.score, 5);
        assert!(plain.score < mixed.score);
        assert_eq!(plain.tier, StrengthTier::Weak);
        assert_eq!(mixed.tier, StrengthTier::Good);
    }

    #[test]
    fn repeats_are_penalised() {
        let repeated = assess_password("aaaaaaaa");
        let varied = assess_password("qwzrtypm");
        assert!(repeated.feedback.contains(&"Avoid repeated characters".to_string()));
        assert!(repeated.score < varied.score);
        assert_eq!(varied.score, 3);
    }

    #[test]
    fn sequences_are_case_insensitive() {
        let result = assess_password("QWXYZ");
        assert!(result.feedback.contains(&"Avoid sequential patterns".to_string()));
        assert!(has_sequential_run(&"xAbCx".chars().collect::<Vec<_>>()));
        assert!(has_sequential_run(&"pin 789".chars().collect::<Vec<_>>()));
        assert!(!has_sequential_run(&"a1b2c3".chars().collect::<Vec<_>>()));
        assert!(!has_sequential_run(&"yz{".chars().collect::<Vec<_>>()));
        assert!(!has_sequential_run(&"89:".chars().collect::<Vec<_>>()));
    }

    #[test]
    fn feedback_follows_check_order() {
        let result = assess_password("password");
        assert_eq!(result.score, 3);
        assert_eq!(result.tier, StrengthTier::Fair);
        assert_eq!(result.crack_time, "3 weeks, 4 days");
        assert_eq!(
            result.feedback,
            vec![
                "Increase length (16+ characters recommended)",
                "Add uppercase letters",
                "Add numbers",
                "Add symbols",
            ]
        );
    }

    #[test]
    fn long_varied_password_is_strong() {
        let result = assess_password("Tr0ub4dor&3xQ9!Z");
        assert_eq!(result.score, 8);
        assert_eq!(result.tier, StrengthTier::Strong);
        assert_eq!(result.crack_time, "centuries");
        assert!(result.feedback.is_empty());
    }

    #[test]
    fn short_password_with_every_class() {
        let result = assess_password("Ab1!");
        assert_eq!(result.score, 5);
        assert_eq!(result.feedback, vec!["Password is too short"]);
    }

    #[test]
    fn score_never_drops_below_zero() {
        // +1 length, +1 lowercase, -1 repeat, -1 sequence
        let result = assess_password("abcaaa");
        assert_eq!(result.score, 0);
        assert_eq!(result.tier, StrengthTier::Weak);
    }

    #[test]
    fn non_ascii_input_is_scored() {
        let result = assess_password("パスワード");
        assert_eq!(result.score, 2);
        assert!(result.feedback.contains(&"Add uppercase letters".to_string()));
        assert!(!result.feedback.contains(&"Add symbols".to_string()));
    }

    #[test]
    fn length_counts_unicode_scalars() {
        // 6 chars, but 12 UTF-16 units and 24 bytes.
        let short = assess_password("😀😁😂🤣😃😄");
        assert_eq!(short.score, 2);
        assert_eq!(short.tier, StrengthTier::Weak);
        assert_eq!(short.feedback[0], "Password is too short");

        // 12 chars lands in the 12..=15 bucket.
        let longer = assess_password("😀😁😂🤣😃😄😅😆😉😊😋😎");
        assert_eq!(longer.score, 4);
        assert!(!longer.feedback.iter().any(|f| f.contains("short") || f.contains("length")));
    }

    #[test]
    fn adding_a_missing_class_never_lowers_the_score() {
        for base in ["password", "PASSWORD12", "zq", "Zq9", "aaaa"] {
            let before = assess_password(base).score;
            for extra in ["Q", "q", "7", "#"] {
                let after = assess_password(&format!("{}{}", base, extra)).score;
                assert!(after >= before, "{} + {} dropped {} -> {}", base, extra, before, after);
            }
        }
    }

    #[test]
    fn tiers_are_monotonic_in_score() {
        let tiers: Vec<StrengthTier> = (0..=MAX_SCORE).map(StrengthTier::from_score).collect();
        assert!(tiers.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(StrengthTier::from_score(2), StrengthTier::Weak);
        assert_eq!(StrengthTier::from_score(3), StrengthTier::Fair);
        assert_eq!(StrengthTier::from_score(4), StrengthTier::Fair);
        assert_eq!(StrengthTier::from_score(6), StrengthTier::Good);
        assert_eq!(StrengthTier::from_score(7), StrengthTier::Strong);
    }

    #[test]
    fn feedback_present_unless_strong() {
        for password in ["a", "abcdefgh", "Password1", "Password1!", "correcthorsebatterystaple", "Aa1!Aa1!Aa1!"] {
            let result = assess_password(password);
            if result.tier != StrengthTier::Strong {
                assert!(!result.feedback.is_empty(), "{} had no feedback", password);
            }
        }
    }

    #[test]
    fn serializes_tier_in_lowercase() {
        let json = serde_json::to_value(assess_password("")).unwrap();
        assert_eq!(json["tier"], "weak");
        assert_eq!(json["crack_time"], "instantly");
    }
}
