use crate::core::impact::ImpactCalculator;
use crate::core::reference::ReferenceData;
use crate::domain::model::{
    EconomicImpact, ProjectSummary, RequestParameters, RfiResponse, WorkforceAnalysis,
};
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use chrono::{Local, NaiveDateTime};
use std::sync::Arc;

pub const GENERATION_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub struct ResponseAssembler {
    reference: Arc<ReferenceData>,
    calculator: ImpactCalculator,
}

impl ResponseAssembler {
    pub fn new(reference: Arc<ReferenceData>) -> Self {
        Self {
            calculator: ImpactCalculator::new(Arc::clone(&reference)),
            reference,
        }
    }

    pub fn assemble(&self, params: &RequestParameters) -> Result<RfiResponse> {
        let impact = self.calculator.compute(params)?;
        self.assemble_with_impact(params, impact)
    }

    pub fn assemble_with_impact(
        &self,
        params: &RequestParameters,
        impact: EconomicImpact,
    ) -> Result<RfiResponse> {
        self.assemble_at(params, impact, Local::now().naive_local())
    }

    /// Same as [`assemble_with_impact`](Self::assemble_with_impact) with an explicit clock reading.
    pub fn assemble_at(
        &self,
        params: &RequestParameters,
        impact: EconomicImpact,
        generated_at: NaiveDateTime,
    ) -> Result<RfiResponse> {
        params.validate()?;
        let location = self.reference.location(&params.location)?;

        Ok(RfiResponse {
            project_summary: ProjectSummary {
                industry: display_case(&params.industry),
                employment: params.employees,
                location: params.location.clone(),
                capex: params.capex,
            },
            workforce_analysis: WorkforceAnalysis {
                available_workforce: location.labor.manufacturing_workforce,
                average_wage: location.labor.average_wage,
                unemployment_rate: location.labor.unemployment_rate,
                stem_graduates: location.labor.stem_graduates_yearly,
            },
            real_estate_options: location.real_estate.clone(),
            incentives: location.incentives.clone(),
            cross_border_advantages: self.reference.cross_border_profile().clone(),
            economic_impact: impact,
            generation_date: generated_at.format(GENERATION_DATE_FORMAT).to_string(),
        })
    }
}

/// 首字母大寫，其餘小寫（"AUTOMOTIVE" -> "Automotive"）
pub fn display_case(value: &str) -> String {
    let mut chars = value.chars();
    let mut out = String::with_capacity(value.len());
    if let Some(first) = chars.next() {
        out.extend(first.to_uppercase());
        out.push_str(&chars.as_str().to_lowercase());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::RfiError;
    use chrono::NaiveDate;

    fn assembler() -> ResponseAssembler {
        ResponseAssembler::new(Arc::new(ReferenceData::builtin()))
    }

    fn fixed_clock() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 14)
            .unwrap()
            .and_hms_opt(9, 26, 53)
            .unwrap()
    }

    fn aerospace_juarez() -> RequestParameters {
        RequestParameters {
            industry: "aerospace".to_string(),
            employees: 500,
            location: "Juarez".to_string(),
            capex: 50_000_000,
        }
    }

    #[test]
    fn test_display_case() {
        assert_eq!(display_case("automotive"), "Automotive");
        assert_eq!(display_case("AEROSPACE"), "Aerospace");
        assert_eq!(display_case(""), "");
    }

    #[test]
    fn test_assemble_joins_reference_data() {
        let asm = assembler();
        let params = aerospace_juarez();
        let impact = asm.calculator.compute(&params).unwrap();
        let response = asm.assemble_at(&params, impact.clone(), fixed_clock()).unwrap();

        assert_eq!(response.project_summary.industry, "Aerospace");
        assert_eq!(response.project_summary.employment, 500);
        assert_eq!(response.project_summary.location, "Juarez");
        assert_eq!(response.project_summary.capex, 50_000_000);
        assert_eq!(response.workforce_analysis.available_workforce, 280_000);
        assert_eq!(response.workforce_analysis.average_wage, 6.25);
        assert_eq!(response.workforce_analysis.stem_graduates, 4_500);
        assert_eq!(response.real_estate_options.major_industrial_parks.len(), 3);
        assert_eq!(response.incentives.property_tax_abatement, "Up to 100% for 5 years");
        assert_eq!(
            response.cross_border_advantages.trade_data.duty_free_programs,
            vec!["USMCA".to_string(), "IMMEX".to_string()]
        );
        assert_eq!(response.economic_impact, impact);
        assert_eq!(response.generation_date, "2025-03-14 09:26:53");
    }

    #[test]
    fn test_assembly_is_deterministic_for_same_clock() {
        let asm = assembler();
        let params = aerospace_juarez();
        let impact = asm.calculator.compute(&params).unwrap();

        let first = asm.assemble_at(&params, impact.clone(), fixed_clock()).unwrap();
        let second = asm.assemble_at(&params, impact, fixed_clock()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_reassembly_leaves_previous_response_untouched() {
        let asm = assembler();
        let first = asm.assemble(&aerospace_juarez()).unwrap();
        let snapshot = first.clone();

        let mut changed = aerospace_juarez();
        changed.location = "El Paso".to_string();
        let second = asm.assemble(&changed).unwrap();

        assert_eq!(first, snapshot);
        assert_eq!(second.project_summary.location, "El Paso");
        assert_eq!(second.workforce_analysis.available_workforce, 42_500);
    }

    #[test]
    fn test_generation_date_has_second_resolution() {
        let response = assembler().assemble(&RequestParameters::default()).unwrap();
        assert!(NaiveDateTime::parse_from_str(&response.generation_date, GENERATION_DATE_FORMAT).is_ok());
    }

    #[test]
    fn test_unknown_location_propagates() {
        let mut params = aerospace_juarez();
        params.location = "juarez".to_string();
        assert!(matches!(
            assembler().assemble(&params),
            Err(RfiError::NotFound { .. })
        ));
    }
}
