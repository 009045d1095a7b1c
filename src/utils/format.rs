use crate::domain::model::{RequestParameters, RfiResponse};

/// Groups the integer part with commas: 1234567 -> "1,234,567".
pub fn with_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if value < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

pub fn currency(value: f64) -> String {
    let cents = format!("{:.2}", value.abs());
    let (whole, fraction) = cents.split_once('.').unwrap_or((cents.as_str(), "00"));
    let whole = whole.parse::<i64>().map(with_thousands).unwrap_or_else(|_| whole.to_string());
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{}${}.{}", sign, whole, fraction)
}

pub fn parameters_summary(params: &RequestParameters) -> String {
    format!(
        "Industry: {}\nEmployees: {}\nLocation: {}\nCapital Investment: ${}",
        params.industry,
        params.employees,
        params.location,
        with_thousands(params.capex)
    )
}

pub fn impact_summary(response: &RfiResponse) -> String {
    let impact = &response.economic_impact;
    format!(
        "Direct Jobs: {}\nIndirect Jobs: {}\nTotal Jobs: {}\nAnnual Payroll: {}\nTotal Economic Output: {}\nEstimated Annual Tax Revenue: {}",
        with_thousands(impact.direct_jobs),
        with_thousands(impact.indirect_jobs),
        with_thousands(impact.total_jobs),
        currency(impact.annual_payroll),
        currency(impact.total_economic_output),
        currency(impact.tax_revenue)
    )
}

pub fn site_summary(response: &RfiResponse) -> String {
    let workforce = &response.workforce_analysis;
    let real_estate = &response.real_estate_options;
    let incentives = &response.incentives;
    format!(
        "Available Workforce: {}\nAverage Wage: ${:.2}/hour\nUnemployment Rate: {}%\nIndustrial Space Available: {} sq ft\nMajor Industrial Parks: {}\nForeign Trade Zone: {}",
        with_thousands(workforce.available_workforce as i64),
        workforce.average_wage,
        workforce.unemployment_rate,
        with_thousands(real_estate.industrial_sqft_available as i64),
        real_estate.major_industrial_parks.join(", "),
        if incentives.foreign_trade_zone {
            "Available"
        } else {
            "Not Available"
        }
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_thousands() {
        assert_eq!(with_thousands(0), "0");
        assert_eq!(with_thousands(999), "999");
        assert_eq!(with_thousands(1_000), "1,000");
        assert_eq!(with_thousands(10_000_000), "10,000,000");
        assert_eq!(with_thousands(-1_234_567), "-1,234,567");
    }

    #[test]
    fn test_currency() {
        assert_eq!(currency(63_650_000.0), "$63,650,000.00");
        assert_eq!(currency(7_800_000.5), "$7,800,000.50");
        assert_eq!(currency(0.0), "$0.00");
    }

    #[test]
    fn test_parameters_summary() {
        let summary = parameters_summary(&RequestParameters::default());
        assert!(summary.contains("Industry: manufacturing"));
        assert!(summary.contains("Capital Investment: $10,000,000"));
    }
}
