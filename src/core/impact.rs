use crate::core::reference::ReferenceData;
use crate::domain::model::{EconomicImpact, Industry, IndustryRecord, RequestParameters};
use crate::utils::error::{RfiError, Result};
use crate::utils::validation::Validate;
use std::sync::Arc;

/// Standard full-time hours in a year.
pub const WORK_HOURS_PER_YEAR: f64 = 2080.0;

pub struct ImpactCalculator {
    reference: Arc<ReferenceData>,
}

impl ImpactCalculator {
    pub fn new(reference: Arc<ReferenceData>) -> Self {
        Self { reference }
    }

    pub fn compute(&self, params: &RequestParameters) -> Result<EconomicImpact> {
        params.validate()?;

        let industry = self.industry_or_fallback(&params.industry);
        let location = self.reference.location(&params.location)?;
        let employees = params.employees;

        let (indirect_jobs, total_jobs) = job_counts(employees, industry.jobs_multiplier)?;

        // 計算順序與公式一致：employees * wage * hours
        let annual_payroll = employees as f64 * location.labor.average_wage * WORK_HOURS_PER_YEAR;
        let total_economic_output = annual_payroll * industry.income_multiplier + params.capex as f64;
        let tax_revenue = employees as f64 * industry.tax_revenue_per_job;

        Ok(EconomicImpact {
            direct_jobs: employees,
            indirect_jobs,
            total_jobs,
            annual_payroll,
            total_economic_output,
            tax_revenue,
            capex: params.capex,
        })
    }

    /// Unknown industries are computed with the manufacturing multipliers.
    fn industry_or_fallback(&self, id: &str) -> &IndustryRecord {
        match id.parse::<Industry>() {
            Ok(industry) => self.reference.industry_record(industry),
            Err(_) => {
                tracing::warn!("⚠️ Unknown industry '{}', using manufacturing multipliers", id);
                self.reference.industry_record(Industry::Manufacturing)
            }
        }
    }
}

/// Relative slack absorbed before truncation; float products such as
/// `100.0 * 2.3` land just below the whole number they stand for.
const JOB_ROUNDING_TOLERANCE: f64 = 1e-12;

/// Indirect and total job counts: `floor(employees * multiplier)` and
/// `employees + indirect`, so `total == direct + indirect` holds exactly.
fn job_counts(employees: i64, jobs_multiplier: f64) -> Result<(i64, i64)> {
    let too_large = || RfiError::validation("employees", employees, "Employee count is too large");

    let product = employees as f64 * jobs_multiplier;
    let indirect = (product * (1.0 + JOB_ROUNDING_TOLERANCE)).floor();
    if !indirect.is_finite() || indirect >= i64::MAX as f64 {
        return Err(too_large());
    }

    let indirect = indirect as i64;
    let total = employees.checked_add(indirect).ok_or_else(too_large)?;

    Ok((indirect, total))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calculator() -> ImpactCalculator {
        ImpactCalculator::new(Arc::new(ReferenceData::builtin()))
    }

    fn params(industry: &str, employees: i64, location: &str, capex: i64) -> RequestParameters {
        RequestParameters {
            industry: industry.to_string(),
            employees,
            location: location.to_string(),
            capex,
        }
    }

    #[test]
    fn test_automotive_el_paso_impact() {
        let impact = calculator()
            .compute(&params("automotive", 200, "El Paso", 10_000_000))
            .unwrap();

        assert_eq!(impact.direct_jobs, 200);
        assert_eq!(impact.indirect_jobs, 560);
        assert_eq!(impact.total_jobs, 760);
        assert_eq!(impact.tax_revenue, 640_000.0);
        assert_eq!(impact.annual_payroll, 200.0 * 18.75 * 2080.0);
        assert_eq!(impact.capex, 10_000_000);
    }

    #[test]
    fn test_aerospace_juarez_impact() {
        let impact = calculator()
            .compute(&params("aerospace", 500, "Juarez", 50_000_000))
            .unwrap();

        assert_eq!(impact.annual_payroll, 6_500_000.0);
        assert_eq!(impact.total_economic_output, 63_650_000.0);
        assert_eq!(impact.indirect_jobs, 1_600);
        assert_eq!(impact.total_jobs, 2_100);
        assert_eq!(impact.tax_revenue, 2_100_000.0);
    }

    #[test]
    fn test_total_jobs_is_direct_plus_indirect_for_every_industry() {
        let calc = calculator();
        for industry in Industry::ALL {
            for employees in [1, 3, 7, 10, 99, 100, 123, 200, 500, 1_000, 4_321] {
                let impact = calc
                    .compute(&params(industry.as_str(), employees, "Las Cruces", 0))
                    .unwrap();
                assert_eq!(
                    impact.total_jobs,
                    impact.direct_jobs + impact.indirect_jobs,
                    "{} with {} employees",
                    industry,
                    employees
                );
            }
        }
    }

    #[test]
    fn test_manufacturing_hundred_employees_counts_whole_jobs() {
        let impact = calculator()
            .compute(&params("manufacturing", 100, "El Paso", 0))
            .unwrap();
        assert_eq!(impact.indirect_jobs, 230);
        assert_eq!(impact.total_jobs, 330);
    }

    #[test]
    fn test_compute_is_deterministic() {
        let calc = calculator();
        let p = params("technology", 321, "Las Cruces", 12_000_000);
        let first = calc.compute(&p).unwrap();
        let second = calc.compute(&p).unwrap();

        assert_eq!(first, second);
        assert_eq!(first.annual_payroll.to_bits(), second.annual_payroll.to_bits());
        assert_eq!(
            first.total_economic_output.to_bits(),
            second.total_economic_output.to_bits()
        );
    }

    #[test]
    fn test_unknown_industry_uses_manufacturing() {
        let calc = calculator();
        let fallback = calc.compute(&params("biotech", 250, "Juarez", 1_000_000)).unwrap();
        let explicit = calc
            .compute(&params("manufacturing", 250, "Juarez", 1_000_000))
            .unwrap();
        assert_eq!(fallback, explicit);
    }

    #[test]
    fn test_unknown_location_is_fatal() {
        let err = calculator()
            .compute(&params("automotive", 200, "Tucson", 0))
            .unwrap_err();
        assert!(matches!(err, RfiError::NotFound { ref kind, ref id } if kind == "location" && id == "Tucson"));
    }

    #[test]
    fn test_negative_overrides_are_rejected() {
        let calc = calculator();
        assert!(matches!(
            calc.compute(&params("automotive", -10, "El Paso", 0)),
            Err(RfiError::ValidationError { .. })
        ));
        assert!(matches!(
            calc.compute(&params("automotive", 10, "El Paso", -1)),
            Err(RfiError::ValidationError { .. })
        ));
    }

    #[test]
    fn test_job_counts_overflow_is_validation_error() {
        assert!(job_counts(i64::MAX, 2.8).is_err());
        assert_eq!(job_counts(10, 2.3).unwrap(), (23, 33));
    }

    #[test]
    fn test_job_counts_floor_multipliers_with_more_decimals() {
        assert_eq!(job_counts(100, 2.125).unwrap(), (212, 312));
        assert_eq!(job_counts(1_000, 2.005).unwrap(), (2_005, 3_005));
        assert_eq!(job_counts(3, 1.333).unwrap(), (3, 6));
        assert_eq!(job_counts(100, 2.3).unwrap(), (230, 330));
    }
}
