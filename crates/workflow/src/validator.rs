//! Submission eligibility and compliance checks. Pure rule engine: same
//! snapshot in, same report out, no side effects.

use launchgate_core::types::{Campaign, ValidationReport};

pub const MIN_BUDGET: f64 = 100.0;
pub const HIGH_BUDGET_WARNING: f64 = 50_000.0;
const MIN_NAME_LEN: usize = 3;
const MIN_AUDIENCE_LEN: usize = 10;
const MIN_HEADLINE_LEN: usize = 5;
const MIN_DESCRIPTION_LEN: usize = 10;

/// Absolute-claim and clinical-overreach phrases that hard-block
/// submission. This is a regulated-industry content gate, not a style
/// check.
const COMPLIANCE_DENYLIST: &[&str] = &[
    "guaranteed results",
    "guaranteed outcome",
    "100% effective",
    "100% success",
    "miracle cure",
    "cures",
    "cure-all",
    "diagnose",
    "clinically proven",
    "painless treatment",
    "risk-free",
    "no risk",
    "instant relief",
    "permanent results",
    "best in the world",
    "better than any competitor",
    "#1 rated",
];

/// Validate a campaign snapshot for submission. Errors block; warnings do
/// not. `report.ok` holds exactly when no errors were found.
pub fn validate(campaign: &Campaign) -> ValidationReport {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if campaign.name.trim().len() < MIN_NAME_LEN {
        errors.push(format!(
            "Campaign name must be at least {MIN_NAME_LEN} characters"
        ));
    }
    if campaign.target_audience.trim().len() < MIN_AUDIENCE_LEN {
        errors.push(format!(
            "Target audience must be at least {MIN_AUDIENCE_LEN} characters"
        ));
    }
    if campaign.objectives.is_empty() {
        errors.push("At least one campaign objective is required".to_string());
    }
    if campaign.channel_selection.is_empty() {
        errors.push("At least one advertising channel must be selected".to_string());
    }

    if campaign.budget < MIN_BUDGET {
        errors.push(format!("Budget must be at least {MIN_BUDGET:.0}"));
    } else if campaign.budget > HIGH_BUDGET_WARNING {
        warnings.push(format!(
            "Budgets above {HIGH_BUDGET_WARNING:.0} require a longer review window"
        ));
    }

    if campaign.creatives.is_empty() {
        warnings.push("No creatives attached; default ad copy will be used".to_string());
    }
    for (i, creative) in campaign.creatives.iter().enumerate() {
        if creative.headline.trim().len() < MIN_HEADLINE_LEN {
            errors.push(format!(
                "Creative {}: headline must be at least {MIN_HEADLINE_LEN} characters",
                i + 1
            ));
        }
        if creative.description.trim().len() < MIN_DESCRIPTION_LEN {
            errors.push(format!(
                "Creative {}: description must be at least {MIN_DESCRIPTION_LEN} characters",
                i + 1
            ));
        }
    }

    scan_compliance(campaign, &mut errors);

    ValidationReport {
        ok: errors.is_empty(),
        errors,
        warnings,
    }
}

/// Case-insensitive substring scan of every reviewer-visible text field
/// against the denylist.
fn scan_compliance(campaign: &Campaign, errors: &mut Vec<String>) {
    let mut check = |field: &str, text: &str| {
        let lowered = text.to_lowercase();
        for phrase in COMPLIANCE_DENYLIST {
            if lowered.contains(phrase) {
                errors.push(format!(
                    "Compliance: {field} contains prohibited phrase \"{phrase}\""
                ));
            }
        }
    };

    check("campaign name", &campaign.name);
    check("target audience", &campaign.target_audience);
    for objective in &campaign.objectives {
        check("objective", objective.display_name());
    }
    for (i, creative) in campaign.creatives.iter().enumerate() {
        let n = i + 1;
        check(&format!("creative {n} headline"), &creative.headline);
        check(&format!("creative {n} description"), &creative.description);
        check(
            &format!("creative {n} call to action"),
            &creative.call_to_action,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use launchgate_core::channels::Channel;
    use launchgate_core::types::{CampaignObjective, Creative};
    use uuid::Uuid;

    fn valid_campaign() -> Campaign {
        let mut campaign = Campaign::draft(
            Uuid::new_v4(),
            "Spring HVAC Promo",
            2_500.0,
            "homeowners in the metro area aged 30-65",
            vec![CampaignObjective::LeadGeneration],
            vec![Channel::Meta, Channel::Google],
        );
        campaign.creatives.push(Creative {
            id: Uuid::new_v4(),
            campaign_id: campaign.id,
            headline: "Beat the heat this spring".into(),
            description: "Book a seasonal tune-up before summer hits".into(),
            call_to_action: "Book Now".into(),
            image_url: None,
        });
        campaign
    }

    #[test]
    fn valid_campaign_passes_clean() {
        let report = validate(&valid_campaign());
        assert!(report.ok);
        assert!(report.errors.is_empty());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn budget_below_minimum_is_an_error_naming_the_minimum() {
        let mut campaign = valid_campaign();
        campaign.budget = 50.0;
        let report = validate(&campaign);
        assert!(!report.ok);
        assert!(report.errors.iter().any(|e| e.contains("at least 100")));
    }

    #[test]
    fn high_budget_is_a_warning_not_an_error() {
        let mut campaign = valid_campaign();
        campaign.budget = 75_000.0;
        let report = validate(&campaign);
        assert!(report.ok);
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("longer review"));
    }

    #[test]
    fn missing_creatives_only_warns() {
        let mut campaign = valid_campaign();
        campaign.creatives.clear();
        let report = validate(&campaign);
        assert!(report.ok);
        assert!(report.warnings.iter().any(|w| w.contains("default ad copy")));
    }

    #[test]
    fn short_creative_fields_are_indexed_errors() {
        let mut campaign = valid_campaign();
        campaign.creatives.push(Creative {
            id: Uuid::new_v4(),
            campaign_id: campaign.id,
            headline: "Hi".into(),
            description: "short".into(),
            call_to_action: "Go".into(),
            image_url: None,
        });
        let report = validate(&campaign);
        assert!(!report.ok);
        assert!(report.errors.iter().any(|e| e.starts_with("Creative 2: headline")));
        assert!(report.errors.iter().any(|e| e.starts_with("Creative 2: description")));
    }

    #[test]
    fn compliance_scan_is_case_insensitive_and_names_the_field() {
        let mut campaign = valid_campaign();
        campaign.creatives[0].headline = "GUARANTEED Results or your money back".into();
        let report = validate(&campaign);
        assert!(!report.ok);
        assert!(report
            .errors
            .iter()
            .any(|e| e.contains("creative 1 headline") && e.contains("guaranteed results")));
    }

    #[test]
    fn compliance_scan_covers_name_and_audience() {
        let mut campaign = valid_campaign();
        campaign.name = "The Miracle Cure Clinic".into();
        campaign.target_audience = "patients we can diagnose over the phone".into();
        let report = validate(&campaign);
        let compliance: Vec<_> = report
            .errors
            .iter()
            .filter(|e| e.starts_with("Compliance:"))
            .collect();
        assert!(compliance.len() >= 2);
    }

    #[test]
    fn validation_is_deterministic() {
        let mut campaign = valid_campaign();
        campaign.budget = 50.0;
        campaign.creatives[0].headline = "risk-free repairs".into();
        assert_eq!(validate(&campaign), validate(&campaign));
    }

    #[test]
    fn empty_channel_selection_blocks() {
        let mut campaign = valid_campaign();
        campaign.channel_selection.clear();
        let report = validate(&campaign);
        assert!(!report.ok);
        assert!(report.errors.iter().any(|e| e.contains("channel")));
    }
}
