use super::types::Tier;

/// One classification rule: every substring must appear in the lower-cased name.
#[derive(Debug, Clone, Copy)]
pub struct TierRule {
    pub required: &'static [&'static str],
    pub tier: Tier,
}

impl TierRule {
    const fn new(required: &'static [&'static str], tier: Tier) -> Self {
        Self { required, tier }
    }

    fn matches(&self, lowered_name: &str) -> bool {
        self.required.iter().all(|needle| lowered_name.contains(needle))
    }
}

/// Evaluated top to bottom, first match wins. Region/number combinations and
/// qualified names must stay above the generic rule they refine.
///
/// Needles are plain substrings, not words: `na` also matches inside
/// "tournament" or "finals".
pub const TIER_RULES: &[TierRule] = &[
    TierRule::new(&["diamond"], Tier::Diamond),
    TierRule::new(&["platinum"], Tier::Platinum),
    TierRule::new(&["gold", "limited"], Tier::GoldLimited),
    TierRule::new(&["gold"], Tier::Gold),
    TierRule::new(&["silver", "eu", "1"], Tier::SilverEu1),
    TierRule::new(&["silver", "eu", "2"], Tier::SilverEu2),
    TierRule::new(&["silver", "na", "1"], Tier::SilverNa1),
    TierRule::new(&["silver", "na", "2"], Tier::SilverNa2),
    TierRule::new(&["silver"], Tier::Silver),
    TierRule::new(&["bronze"], Tier::Bronze),
];

/// Classify a tournament display name. Total: a missing name or one that
/// matches no rule is `Tier::Unknown`.
pub fn classify(name: Option<&str>) -> Tier {
    let Some(name) = name else {
        return Tier::Unknown;
    };

    let lowered = name.to_lowercase();
    TIER_RULES
        .iter()
        .find(|rule| rule.matches(&lowered))
        .map(|rule| rule.tier)
        .unwrap_or(Tier::Unknown)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_basic_tiers() {
        assert_eq!(classify(Some("Weekly Diamond Clash")), Tier::Diamond);
        assert_eq!(classify(Some("PLATINUM open")), Tier::Platinum);
        assert_eq!(classify(Some("Gold Cup")), Tier::Gold);
        assert_eq!(classify(Some("Silver Invitational")), Tier::Silver);
        assert_eq!(classify(Some("bronze league")), Tier::Bronze);
    }

    #[test]
    fn test_specific_rules_take_precedence() {
        assert_eq!(classify(Some("Gold Limited Cup")), Tier::GoldLimited);
        assert_eq!(classify(Some("LIMITED edition gold")), Tier::GoldLimited);
        assert_eq!(classify(Some("EU Silver Cup 1")), Tier::SilverEu1);
        assert_eq!(classify(Some("eu silver cup 2")), Tier::SilverEu2);
        assert_eq!(classify(Some("NA Silver Cup 1")), Tier::SilverNa1);
        assert_eq!(classify(Some("Silver NA #2")), Tier::SilverNa2);
        assert_eq!(classify(Some("Silver EU Cup")), Tier::Silver);
    }

    #[test]
    fn test_region_needles_match_inside_words() {
        assert_eq!(classify(Some("Silver Tournament 2")), Tier::SilverNa2);
        assert_eq!(classify(Some("Silver Finals 1")), Tier::SilverNa1);
        assert_eq!(classify(Some("Silver European Open 2")), Tier::SilverEu2);
    }

    #[test]
    fn test_unknown_tiers() {
        assert_eq!(classify(None), Tier::Unknown);
        assert_eq!(classify(Some("")), Tier::Unknown);
        assert_eq!(classify(Some("Friday Night Scrims")), Tier::Unknown);
    }

    #[test]
    fn test_classify_is_deterministic() {
        let names = ["EU Silver Cup 1", "Gold Limited", "random", "Diamond Gold"];
        for name in names {
            assert_eq!(classify(Some(name)), classify(Some(name)));
        }
        assert_eq!(classify(Some("Diamond Gold")), Tier::Diamond);
    }

    #[test]
    fn test_no_rule_is_shadowed_by_an_earlier_generic_rule() {
        for (idx, rule) in TIER_RULES.iter().enumerate() {
            for later in &TIER_RULES[idx + 1..] {
                let later_refines_rule = rule.required.iter().all(|n| later.required.contains(n));
                assert!(
                    !later_refines_rule,
                    "{:?} can never match because {:?} comes first",
                    later.tier, rule.tier
                );
            }
        }
    }
}
