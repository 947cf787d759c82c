//! In-progress campaign being edited in the create form

use super::campaign::{CreateCampaignPayload, CAMPAIGN_TYPES, OBJECTIVES};
use chrono::NaiveDate;
use thiserror::Error;

/// Editable fields of the create form, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Objective,
    CampaignType,
    DailyBudget,
    StartDate,
    EndDate,
    AdGroupName,
    AdHeadline,
    AdDescription,
    AssetUrl,
    Submit,
}

impl FormField {
    pub fn all() -> [FormField; 11] {
        [
            FormField::Name,
            FormField::Objective,
            FormField::CampaignType,
            FormField::DailyBudget,
            FormField::StartDate,
            FormField::EndDate,
            FormField::AdGroupName,
            FormField::AdHeadline,
            FormField::AdDescription,
            FormField::AssetUrl,
            FormField::Submit,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Name => "Campaign name",
            FormField::Objective => "Objective",
            FormField::CampaignType => "Campaign type",
            FormField::DailyBudget => "Daily budget",
            FormField::StartDate => "Start date",
            FormField::EndDate => "End date",
            FormField::AdGroupName => "Ad group name",
            FormField::AdHeadline => "Ad headline",
            FormField::AdDescription => "Ad description",
            FormField::AssetUrl => "Asset URL",
            FormField::Submit => "Create Campaign",
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            FormField::DailyBudget => "amount per day",
            FormField::StartDate | FormField::EndDate => "YYYY-MM-DD",
            FormField::AssetUrl => "optional",
            _ => "",
        }
    }

    pub fn next(&self) -> FormField {
        let fields = Self::all();
        let idx = fields.iter().position(|f| f == self).unwrap_or(0);
        fields[(idx + 1) % fields.len()]
    }

    pub fn prev(&self) -> FormField {
        let fields = Self::all();
        let idx = fields.iter().position(|f| f == self).unwrap_or(0);
        fields[(idx + fields.len() - 1) % fields.len()]
    }

    /// Choice fields cycle through a fixed vocabulary instead of taking text
    pub fn is_choice(&self) -> bool {
        matches!(self, FormField::Objective | FormField::CampaignType)
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, FormField::DailyBudget)
    }

    pub fn is_date(&self) -> bool {
        matches!(self, FormField::StartDate | FormField::EndDate)
    }

    /// Fields that must be filled in before the form submits
    pub fn is_required(&self) -> bool {
        !matches!(self, FormField::AssetUrl | FormField::Submit)
    }
}

/// Reasons a draft cannot be submitted yet
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("{0} is required")]
    Missing(&'static str),
    #[error("Daily budget must be at least 1")]
    BudgetTooLow,
    #[error("{0} must be a date in YYYY-MM-DD format")]
    InvalidDate(&'static str),
}

/// The create form's working copy of a campaign payload
#[derive(Debug, Clone, PartialEq)]
pub struct CampaignDraft {
    pub name: String,
    pub objective: String,
    pub campaign_type: String,
    /// `None` until the user types a number
    pub daily_budget: Option<u64>,
    pub start_date: String,
    pub end_date: String,
    pub ad_group_name: String,
    pub ad_headline: String,
    pub ad_description: String,
    pub asset_url: String,
}

impl Default for CampaignDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            objective: OBJECTIVES[0].to_string(),
            campaign_type: CAMPAIGN_TYPES[0].to_string(),
            daily_budget: None,
            start_date: String::new(),
            end_date: String::new(),
            ad_group_name: String::new(),
            ad_headline: String::new(),
            ad_description: String::new(),
            asset_url: String::new(),
        }
    }
}

impl CampaignDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Back to the blank initial values
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Text shown in the form for a field
    pub fn value(&self, field: FormField) -> String {
        match field {
            FormField::Name => self.name.clone(),
            FormField::Objective => self.objective.clone(),
            FormField::CampaignType => self.campaign_type.clone(),
            FormField::DailyBudget => self
                .daily_budget
                .map(|b| b.to_string())
                .unwrap_or_default(),
            FormField::StartDate => self.start_date.clone(),
            FormField::EndDate => self.end_date.clone(),
            FormField::AdGroupName => self.ad_group_name.clone(),
            FormField::AdHeadline => self.ad_headline.clone(),
            FormField::AdDescription => self.ad_description.clone(),
            FormField::AssetUrl => self.asset_url.clone(),
            FormField::Submit => String::new(),
        }
    }

    fn text_mut(&mut self, field: FormField) -> Option<&mut String> {
        match field {
            FormField::Name => Some(&mut self.name),
            FormField::StartDate => Some(&mut self.start_date),
            FormField::EndDate => Some(&mut self.end_date),
            FormField::AdGroupName => Some(&mut self.ad_group_name),
            FormField::AdHeadline => Some(&mut self.ad_headline),
            FormField::AdDescription => Some(&mut self.ad_description),
            FormField::AssetUrl => Some(&mut self.asset_url),
            _ => None,
        }
    }

    /// Apply a typed character to a field.
    ///
    /// The budget is coerced to a number on every keystroke; non-digits are
    /// dropped. Date fields only take digits and dashes. Returns whether the
    /// draft changed.
    pub fn push_char(&mut self, field: FormField, c: char) -> bool {
        if field.is_numeric() {
            let Some(digit) = c.to_digit(10) else {
                return false;
            };
            let current = self.daily_budget.unwrap_or(0);
            match current
                .checked_mul(10)
                .and_then(|v| v.checked_add(u64::from(digit)))
            {
                Some(v) => {
                    self.daily_budget = Some(v);
                    true
                }
                None => false,
            }
        } else if field.is_date() {
            if !(c.is_ascii_digit() || c == '-') {
                return false;
            }
            match self.text_mut(field) {
                Some(text) if text.len() < 10 => {
                    text.push(c);
                    true
                }
                _ => false,
            }
        } else if let Some(text) = self.text_mut(field) {
            text.push(c);
            true
        } else {
            false
        }
    }

    /// Delete the last character of a field
    pub fn pop_char(&mut self, field: FormField) -> bool {
        if field.is_numeric() {
            return match self.daily_budget {
                Some(v) if v >= 10 => {
                    self.daily_budget = Some(v / 10);
                    true
                }
                Some(_) => {
                    self.daily_budget = None;
                    true
                }
                None => false,
            };
        }
        self.text_mut(field).and_then(|t| t.pop()).is_some()
    }

    /// Step a choice field forwards or backwards through its vocabulary
    pub fn cycle_choice(&mut self, field: FormField, forward: bool) {
        let (options, value): (&[&str], &mut String) = match field {
            FormField::Objective => (&OBJECTIVES[..], &mut self.objective),
            FormField::CampaignType => (&CAMPAIGN_TYPES[..], &mut self.campaign_type),
            _ => return,
        };
        let idx = options.iter().position(|o| o == value).unwrap_or(0);
        let next = if forward {
            (idx + 1) % options.len()
        } else {
            (idx + options.len() - 1) % options.len()
        };
        *value = options[next].to_string();
    }

    /// Check the required fields and build the payload to send
    pub fn validate(&self) -> Result<CreateCampaignPayload, DraftError> {
        let required = |value: &str, field: FormField| -> Result<String, DraftError> {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                Err(DraftError::Missing(field.label()))
            } else {
                Ok(trimmed.to_string())
            }
        };

        let name = required(&self.name, FormField::Name)?;
        let daily_budget = match self.daily_budget {
            None => return Err(DraftError::Missing(FormField::DailyBudget.label())),
            Some(0) => return Err(DraftError::BudgetTooLow),
            Some(v) => v,
        };
        let start_date = required(&self.start_date, FormField::StartDate)?;
        check_date(&start_date, FormField::StartDate)?;
        let end_date = required(&self.end_date, FormField::EndDate)?;
        check_date(&end_date, FormField::EndDate)?;
        let ad_group_name = required(&self.ad_group_name, FormField::AdGroupName)?;
        let ad_headline = required(&self.ad_headline, FormField::AdHeadline)?;
        let ad_description = required(&self.ad_description, FormField::AdDescription)?;

        let asset_url = self.asset_url.trim();

        Ok(CreateCampaignPayload {
            name,
            objective: self.objective.clone(),
            campaign_type: self.campaign_type.clone(),
            daily_budget,
            start_date,
            end_date,
            ad_group_name,
            ad_headline,
            ad_description,
            asset_url: (!asset_url.is_empty()).then(|| asset_url.to_string()),
        })
    }
}

fn check_date(value: &str, field: FormField) -> Result<(), DraftError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|_| ())
        .map_err(|_| DraftError::InvalidDate(field.label()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_into(draft: &mut CampaignDraft, field: FormField, text: &str) {
        for c in text.chars() {
            draft.push_char(field, c);
        }
    }

    fn filled_draft() -> CampaignDraft {
        let mut draft = CampaignDraft::new();
        type_into(&mut draft, FormField::Name, "Sale");
        type_into(&mut draft, FormField::DailyBudget, "500");
        type_into(&mut draft, FormField::StartDate, "2024-01-01");
        type_into(&mut draft, FormField::EndDate, "2024-01-31");
        type_into(&mut draft, FormField::AdGroupName, "AG1");
        type_into(&mut draft, FormField::AdHeadline, "Big Sale");
        type_into(&mut draft, FormField::AdDescription, "Save now");
        draft
    }

    #[test]
    fn test_initial_values() {
        let draft = CampaignDraft::new();
        assert_eq!(draft.objective, "TRAFFIC");
        assert_eq!(draft.campaign_type, "SEARCH");
        assert_eq!(draft.daily_budget, None);
        assert_eq!(draft.value(FormField::DailyBudget), "");
    }

    #[test]
    fn test_required_fields() {
        assert!(FormField::Name.is_required());
        assert!(FormField::DailyBudget.is_required());
        assert!(!FormField::AssetUrl.is_required());
        assert!(!FormField::Submit.is_required());
    }

    #[test]
    fn test_budget_coerced_while_typing() {
        let mut draft = CampaignDraft::new();
        assert!(draft.push_char(FormField::DailyBudget, '5'));
        assert!(!draft.push_char(FormField::DailyBudget, 'x'));
        assert!(draft.push_char(FormField::DailyBudget, '0'));
        assert_eq!(draft.daily_budget, Some(50));

        assert!(draft.pop_char(FormField::DailyBudget));
        assert_eq!(draft.daily_budget, Some(5));
        assert!(draft.pop_char(FormField::DailyBudget));
        assert_eq!(draft.daily_budget, None);
        assert!(!draft.pop_char(FormField::DailyBudget));
    }

    #[test]
    fn test_budget_overflow_is_rejected() {
        let mut draft = CampaignDraft::new();
        type_into(&mut draft, FormField::DailyBudget, "18446744073709551615");
        assert_eq!(draft.daily_budget, Some(u64::MAX));
        assert!(!draft.push_char(FormField::DailyBudget, '1'));
    }

    #[test]
    fn test_date_fields_only_take_date_characters() {
        let mut draft = CampaignDraft::new();
        type_into(&mut draft, FormField::StartDate, "2024-0a1-01xx99");
        assert_eq!(draft.start_date, "2024-01-01");
    }

    #[test]
    fn test_cycle_choice_wraps() {
        let mut draft = CampaignDraft::new();
        draft.cycle_choice(FormField::Objective, false);
        assert_eq!(draft.objective, "AWARENESS");
        draft.cycle_choice(FormField::Objective, true);
        assert_eq!(draft.objective, "TRAFFIC");
        draft.cycle_choice(FormField::CampaignType, true);
        assert_eq!(draft.campaign_type, "DISPLAY");
        // Free-text fields are untouched
        draft.cycle_choice(FormField::Name, true);
        assert_eq!(draft.name, "");
    }

    #[test]
    fn test_field_navigation_wraps() {
        assert_eq!(FormField::Name.prev(), FormField::Submit);
        assert_eq!(FormField::Submit.next(), FormField::Name);
        assert_eq!(FormField::Objective.next(), FormField::CampaignType);
    }

    #[test]
    fn test_validate_builds_payload() {
        let payload = filled_draft().validate().unwrap();
        assert_eq!(payload.name, "Sale");
        assert_eq!(payload.objective, "TRAFFIC");
        assert_eq!(payload.campaign_type, "SEARCH");
        assert_eq!(payload.daily_budget, 500);
        assert_eq!(payload.start_date, "2024-01-01");
        assert_eq!(payload.end_date, "2024-01-31");
        assert_eq!(payload.asset_url, None);
    }

    #[test]
    fn test_validate_reports_first_missing_field() {
        let mut draft = filled_draft();
        draft.ad_headline = "   ".to_string();
        assert_eq!(draft.validate(), Err(DraftError::Missing("Ad headline")));

        let mut draft = filled_draft();
        draft.daily_budget = None;
        assert_eq!(draft.validate(), Err(DraftError::Missing("Daily budget")));

        let mut draft = filled_draft();
        draft.daily_budget = Some(0);
        assert_eq!(draft.validate(), Err(DraftError::BudgetTooLow));
    }

    #[test]
    fn test_validate_rejects_malformed_date() {
        let mut draft = filled_draft();
        draft.end_date = "2024-13-01".to_string();
        assert_eq!(draft.validate(), Err(DraftError::InvalidDate("End date")));
    }

    #[test]
    fn test_end_before_start_is_left_to_the_server() {
        let mut draft = filled_draft();
        draft.start_date = "2024-02-01".to_string();
        draft.end_date = "2024-01-01".to_string();
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn test_reset_restores_blank_state() {
        let mut draft = filled_draft();
        draft.asset_url = "https://cdn.example.com/a.png".to_string();
        draft.reset();
        assert_eq!(draft, CampaignDraft::new());
    }
}
