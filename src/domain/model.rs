use crate::utils::error::{Result as RfiResult, RfiError};
use crate::utils::validation::{validate_at_least, validate_non_empty_string, Validate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Candidate sites. The first variant is the default site for prompts that name none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Location {
    #[serde(rename = "El Paso")]
    ElPaso,
    #[serde(rename = "Las Cruces")]
    LasCruces,
    #[serde(rename = "Juarez")]
    Juarez,
}

impl Location {
    pub const COUNT: usize = 3;
    pub const ALL: [Location; Self::COUNT] = [Location::ElPaso, Location::LasCruces, Location::Juarez];

    pub fn as_str(&self) -> &'static str {
        match self {
            Location::ElPaso => "El Paso",
            Location::LasCruces => "Las Cruces",
            Location::Juarez => "Juarez",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Location {
    type Err = RfiError;

    // 地點名稱區分大小寫，與標準寫法完全相同才算
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Location::ALL
            .into_iter()
            .find(|location| location.as_str() == s)
            .ok_or_else(|| RfiError::not_found("location", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Industry {
    Automotive,
    Electronics,
    Medical,
    Aerospace,
    Manufacturing,
    Logistics,
    Technology,
}

impl Industry {
    pub const COUNT: usize = 7;
    pub const ALL: [Industry; Self::COUNT] = [
        Industry::Automotive,
        Industry::Electronics,
        Industry::Medical,
        Industry::Aerospace,
        Industry::Manufacturing,
        Industry::Logistics,
        Industry::Technology,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Industry::Automotive => "automotive",
            Industry::Electronics => "electronics",
            Industry::Medical => "medical",
            Industry::Aerospace => "aerospace",
            Industry::Manufacturing => "manufacturing",
            Industry::Logistics => "logistics",
            Industry::Technology => "technology",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Industry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Industry {
    type Err = RfiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Industry::ALL
            .into_iter()
            .find(|industry| industry.as_str() == s)
            .ok_or_else(|| RfiError::not_found("industry", s))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaborStats {
    pub manufacturing_workforce: u64,
    /// Hourly, in USD.
    pub average_wage: f64,
    pub unemployment_rate: f64,
    pub stem_graduates_yearly: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RealEstate {
    pub industrial_sqft_available: u64,
    pub avg_lease_rate: f64,
    pub avg_land_cost: f64,
    pub major_industrial_parks: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Incentives {
    pub property_tax_abatement: String,
    pub job_training_grants: String,
    pub infrastructure_grants: String,
    pub foreign_trade_zone: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    pub labor: LaborStats,
    pub real_estate: RealEstate,
    pub incentives: Incentives,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndustryRecord {
    pub jobs_multiplier: f64,
    pub income_multiplier: f64,
    pub tax_revenue_per_job: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BorderCrossings {
    pub commercial_crossings_daily: u64,
    pub crossing_wait_times_avg: String,
    pub maquiladora_facilities: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeData {
    pub annual_trade_value: String,
    pub main_industries: Vec<String>,
    pub duty_free_programs: Vec<String>,
}

/// Region-wide record shared by every location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossBorderProfile {
    pub border_crossings: BorderCrossings,
    pub trade_data: TradeData,
}

/// 單次請求的參數。industry 與 location 保留原始字串，
/// 由計算器與組裝器負責解析（industry 可回退，location 不可）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestParameters {
    pub industry: String,
    pub employees: i64,
    pub location: String,
    pub capex: i64,
}

pub const DEFAULT_EMPLOYEES: i64 = 100;
pub const DEFAULT_CAPEX: i64 = 10_000_000;

impl Default for RequestParameters {
    fn default() -> Self {
        Self {
            industry: Industry::Manufacturing.as_str().to_string(),
            employees: DEFAULT_EMPLOYEES,
            location: Location::ALL[0].as_str().to_string(),
            capex: DEFAULT_CAPEX,
        }
    }
}

impl Validate for RequestParameters {
    fn validate(&self) -> RfiResult<()> {
        validate_non_empty_string("industry", &self.industry)?;
        validate_non_empty_string("location", &self.location)?;
        validate_at_least("employees", self.employees, 1)?;
        validate_at_least("capex", self.capex, 0)?;
        Ok(())
    }
}

/// Partial replacement of a previous request's parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employees: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capex: Option<i64>,
}

impl RequestOverrides {
    pub fn is_empty(&self) -> bool {
        self.industry.is_none()
            && self.employees.is_none()
            && self.location.is_none()
            && self.capex.is_none()
    }

    pub fn apply_to(&self, base: &RequestParameters) -> RequestParameters {
        RequestParameters {
            industry: self.industry.clone().unwrap_or_else(|| base.industry.clone()),
            employees: self.employees.unwrap_or(base.employees),
            location: self.location.clone().unwrap_or_else(|| base.location.clone()),
            capex: self.capex.unwrap_or(base.capex),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EconomicImpact {
    pub direct_jobs: i64,
    pub indirect_jobs: i64,
    pub total_jobs: i64,
    pub annual_payroll: f64,
    pub total_economic_output: f64,
    pub tax_revenue: f64,
    pub capex: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSummary {
    pub industry: String,
    pub employment: i64,
    pub location: String,
    pub capex: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkforceAnalysis {
    pub available_workforce: u64,
    pub average_wage: f64,
    pub unemployment_rate: f64,
    pub stem_graduates: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RfiResponse {
    pub project_summary: ProjectSummary,
    pub workforce_analysis: WorkforceAnalysis,
    pub real_estate_options: RealEstate,
    pub incentives: Incentives,
    pub cross_border_advantages: CrossBorderProfile,
    pub economic_impact: EconomicImpact,
    pub generation_date: String,
}

impl RfiResponse {
    /// Parameters this response was assembled from, recovered from the project summary.
    pub fn parameters(&self) -> RequestParameters {
        RequestParameters {
            industry: self.project_summary.industry.to_lowercase(),
            employees: self.project_summary.employment,
            location: self.project_summary.location.clone(),
            capex: self.project_summary.capex,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_round_trips_through_canonical_name() {
        for location in Location::ALL {
            assert_eq!(location.as_str().parse::<Location>().unwrap(), location);
        }
        assert!("el paso".parse::<Location>().is_err());
        assert!("Tucson".parse::<Location>().is_err());
    }

    #[test]
    fn test_industry_parse_rejects_unknown() {
        assert_eq!("aerospace".parse::<Industry>().unwrap(), Industry::Aerospace);
        assert!("biotech".parse::<Industry>().is_err());
    }

    #[test]
    fn test_default_parameters_resolve() {
        let params = RequestParameters::default();
        assert_eq!(params.industry.parse::<Industry>().unwrap(), Industry::Manufacturing);
        assert_eq!(params.location.parse::<Location>().unwrap(), Location::ElPaso);
        assert_eq!(params.employees, 100);
        assert_eq!(params.capex, 10_000_000);
    }

    #[test]
    fn test_overrides_carry_over_unspecified_fields() {
        let base = RequestParameters {
            industry: "aerospace".to_string(),
            employees: 500,
            location: "Juarez".to_string(),
            capex: 50_000_000,
        };
        let overrides = RequestOverrides {
            employees: Some(750),
            ..Default::default()
        };

        let updated = overrides.apply_to(&base);
        assert_eq!(updated.employees, 750);
        assert_eq!(updated.industry, "aerospace");
        assert_eq!(updated.location, "Juarez");
        assert_eq!(updated.capex, 50_000_000);
        assert!(RequestOverrides::default().is_empty());
    }

    #[test]
    fn test_negative_numbers_fail_validation() {
        let mut params = RequestParameters::default();
        assert!(params.validate().is_ok());

        params.employees = -5;
        assert!(matches!(
            params.validate(),
            Err(RfiError::ValidationError { ref field, .. }) if field == "employees"
        ));

        let params = RequestParameters {
            capex: -1,
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(RfiError::ValidationError { ref field, .. }) if field == "capex"
        ));
    }

    #[test]
    fn test_location_serializes_with_display_name() {
        let json = serde_json::to_string(&Location::LasCruces).unwrap();
        assert_eq!(json, "\"Las Cruces\"");
    }
}
