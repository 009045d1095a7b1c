use crate::domain::model::{Industry, Location, RequestParameters};
use crate::utils::error::Result;
use regex::Regex;

const MILLION: i64 = 1_000_000;

/// Pattern-based extraction of request parameters from a free-text prompt.
///
/// Each field has its own matcher that scans the whole prompt independently;
/// the first match wins and a miss leaves the default in place.
#[derive(Debug, Clone)]
pub struct PromptExtractor {
    industry_re: Regex,
    employees_re: Regex,
    location_re: Regex,
    capex_re: Regex,
}

impl PromptExtractor {
    pub fn new() -> Result<Self> {
        let industries = Industry::ALL
            .iter()
            .map(|i| regex::escape(i.as_str()))
            .collect::<Vec<_>>()
            .join("|");
        let locations = Location::ALL
            .iter()
            .map(|l| regex::escape(l.as_str()))
            .collect::<Vec<_>>()
            .join("|");

        Ok(Self {
            // ASCII-only case folding: every match must parse back into an Industry
            industry_re: Regex::new(&format!(r"\b((?i-u:{}))\b", industries))?,
            employees_re: Regex::new(r"([0-9]+)[ -]?employee")?,
            location_re: Regex::new(&format!("({})", locations))?,
            capex_re: Regex::new(r"\$([0-9]+)[ -]?million")?,
        })
    }

    pub fn extract(&self, prompt: &str) -> RequestParameters {
        let defaults = RequestParameters::default();

        let params = RequestParameters {
            industry: self
                .industry(prompt)
                .map(|i| i.as_str().to_string())
                .unwrap_or(defaults.industry),
            employees: self.employees(prompt).unwrap_or(defaults.employees),
            location: self
                .location(prompt)
                .map(|l| l.as_str().to_string())
                .unwrap_or(defaults.location),
            capex: self.capex(prompt).unwrap_or(defaults.capex),
        };

        tracing::debug!(
            "Extracted parameters: industry={}, employees={}, location={}, capex={}",
            params.industry,
            params.employees,
            params.location,
            params.capex
        );
        params
    }

    pub fn industry(&self, prompt: &str) -> Option<Industry> {
        let caps = self.industry_re.captures(prompt)?;
        caps[1].to_lowercase().parse().ok()
    }

    /// 員工數必須為正整數，0 或超出範圍的數字視為未匹配
    pub fn employees(&self, prompt: &str) -> Option<i64> {
        let caps = self.employees_re.captures(prompt)?;
        caps[1].parse::<i64>().ok().filter(|n| *n > 0)
    }

    pub fn location(&self, prompt: &str) -> Option<Location> {
        let caps = self.location_re.captures(prompt)?;
        caps[1].parse().ok()
    }

    pub fn capex(&self, prompt: &str) -> Option<i64> {
        let caps = self.capex_re.captures(prompt)?;
        caps[1].parse::<i64>().ok()?.checked_mul(MILLION)
    }
}
