use crate::domain::model::{
    BorderCrossings, CrossBorderProfile, Incentives, Industry, IndustryRecord, LaborStats,
    Location, LocationRecord, RealEstate, TradeData,
};
use crate::utils::error::{RfiError, Result};
use crate::utils::validation::{validate_greater_than, Validate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Display;
use std::path::Path;
use std::str::FromStr;

/// Read-only reference tables: one record per location, one per industry,
/// and the shared cross-border profile.
///
/// Every key of the closed [`Location`] and [`Industry`] sets is guaranteed to
/// be present once a value exists, so typed lookups never fail.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceData {
    locations: [LocationRecord; Location::COUNT],
    industries: [IndustryRecord; Industry::COUNT],
    cross_border: CrossBorderProfile,
}

/// On-disk shape of the reference tables (TOML).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceTables {
    pub locations: HashMap<String, LocationRecord>,
    pub industries: HashMap<String, IndustryRecord>,
    pub cross_border: CrossBorderProfile,
}

impl ReferenceData {
    pub fn builtin() -> Self {
        Self {
            locations: [
                location(
                    LaborStats {
                        manufacturing_workforce: 42_500,
                        average_wage: 18.75,
                        unemployment_rate: 4.2,
                        stem_graduates_yearly: 3_200,
                    },
                    RealEstate {
                        industrial_sqft_available: 2_500_000,
                        avg_lease_rate: 5.75,
                        avg_land_cost: 3.25,
                        major_industrial_parks: strings(&[
                            "West Texas Industrial Park",
                            "El Paso Logistics Park",
                            "Mission Industrial Park",
                        ]),
                    },
                    Incentives {
                        property_tax_abatement: "Up to 100% abatement for 10 years".to_string(),
                        job_training_grants: "Up to $2,500 per employee".to_string(),
                        infrastructure_grants: "Case-by-case basis".to_string(),
                        foreign_trade_zone: true,
                    },
                ),
                location(
                    LaborStats {
                        manufacturing_workforce: 12_800,
                        average_wage: 17.50,
                        unemployment_rate: 4.5,
                        stem_graduates_yearly: 1_800,
                    },
                    RealEstate {
                        industrial_sqft_available: 850_000,
                        avg_lease_rate: 5.25,
                        avg_land_cost: 2.75,
                        major_industrial_parks: strings(&[
                            "West Mesa Industrial Park",
                            "Las Cruces Innovation & Industrial Park",
                        ]),
                    },
                    Incentives {
                        property_tax_abatement: "Up to 90% abatement for 20 years".to_string(),
                        job_training_grants: "Up to $3,000 per employee".to_string(),
                        infrastructure_grants: "$500,000 maximum".to_string(),
                        foreign_trade_zone: true,
                    },
                ),
                location(
                    LaborStats {
                        manufacturing_workforce: 280_000,
                        average_wage: 6.25,
                        unemployment_rate: 3.2,
                        stem_graduates_yearly: 4_500,
                    },
                    RealEstate {
                        industrial_sqft_available: 3_800_000,
                        avg_lease_rate: 4.50,
                        avg_land_cost: 2.25,
                        major_industrial_parks: strings(&[
                            "Juarez Industrial Park",
                            "Bermudez Industrial Park",
                            "San Jeronimo Park",
                        ]),
                    },
                    Incentives {
                        property_tax_abatement: "Up to 100% for 5 years".to_string(),
                        job_training_grants: "Up to $1,500 per employee".to_string(),
                        infrastructure_grants: "Case-by-case basis".to_string(),
                        foreign_trade_zone: true,
                    },
                ),
            ],
            // 順序與 Industry::ALL 相同
            industries: [
                industry(2.8, 1.9, 3_200.0),
                industry(2.5, 1.7, 2_800.0),
                industry(2.1, 1.8, 3_500.0),
                industry(3.2, 2.1, 4_200.0),
                industry(2.3, 1.6, 2_500.0),
                industry(1.9, 1.4, 2_200.0),
                industry(2.7, 2.0, 3_800.0),
            ],
            cross_border: CrossBorderProfile {
                border_crossings: BorderCrossings {
                    commercial_crossings_daily: 2_800,
                    crossing_wait_times_avg: "45 minutes".to_string(),
                    maquiladora_facilities: 330,
                },
                trade_data: TradeData {
                    annual_trade_value: "$82 billion".to_string(),
                    main_industries: strings(&[
                        "Automotive",
                        "Electronics",
                        "Medical Devices",
                        "Aerospace",
                    ]),
                    duty_free_programs: strings(&["USMCA", "IMMEX"]),
                },
            },
        }
    }

    /// Builds the store from loose tables, rejecting unknown or missing keys.
    pub fn from_tables(tables: ReferenceTables) -> Result<Self> {
        let data = Self {
            locations: index_table("location", Location::ALL, tables.locations)?,
            industries: index_table("industry", Industry::ALL, tables.industries)?,
            cross_border: tables.cross_border,
        };
        data.validate()?;
        Ok(data)
    }

    /// 從 TOML 檔案載入參考資料
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let tables: ReferenceTables = toml::from_str(content)
            .map_err(|e| RfiError::config(format!("Reference data parsing error: {}", e)))?;
        Self::from_tables(tables)
    }

    pub fn to_tables(&self) -> ReferenceTables {
        ReferenceTables {
            locations: Location::ALL
                .iter()
                .map(|l| (l.to_string(), self.location_record(*l).clone()))
                .collect(),
            industries: Industry::ALL
                .iter()
                .map(|i| (i.to_string(), self.industry_record(*i).clone()))
                .collect(),
            cross_border: self.cross_border.clone(),
        }
    }

    /// Lookup by canonical location name; fails only for names outside the fixed set.
    pub fn location(&self, id: &str) -> Result<&LocationRecord> {
        let location: Location = id.parse()?;
        Ok(self.location_record(location))
    }

    pub fn location_record(&self, location: Location) -> &LocationRecord {
        &self.locations[location.index()]
    }

    pub fn industry(&self, id: &str) -> Result<&IndustryRecord> {
        let industry: Industry = id.parse()?;
        Ok(self.industry_record(industry))
    }

    pub fn industry_record(&self, industry: Industry) -> &IndustryRecord {
        &self.industries[industry.index()]
    }

    pub fn cross_border_profile(&self) -> &CrossBorderProfile {
        &self.cross_border
    }
}

impl Default for ReferenceData {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Validate for ReferenceData {
    fn validate(&self) -> Result<()> {
        for (industry, record) in Industry::ALL.iter().zip(self.industries.iter()) {
            validate_greater_than(
                &format!("industries.{}.jobs_multiplier", industry),
                record.jobs_multiplier,
                1.0,
            )
            .map_err(into_config_error)?;
            validate_greater_than(
                &format!("industries.{}.income_multiplier", industry),
                record.income_multiplier,
                1.0,
            )
            .map_err(into_config_error)?;
            if !record.tax_revenue_per_job.is_finite() || record.tax_revenue_per_job < 0.0 {
                return Err(RfiError::config(format!(
                    "industries.{}.tax_revenue_per_job must be a non-negative amount",
                    industry
                )));
            }
        }

        for (location, record) in Location::ALL.iter().zip(self.locations.iter()) {
            validate_greater_than(
                &format!("locations.{}.labor.average_wage", location),
                record.labor.average_wage,
                0.0,
            )
            .map_err(into_config_error)?;
        }

        Ok(())
    }
}

fn into_config_error(err: RfiError) -> RfiError {
    RfiError::config(err.to_string())
}

fn index_table<K, V, const N: usize>(
    kind: &str,
    keys: [K; N],
    mut table: HashMap<String, V>,
) -> Result<[V; N]>
where
    K: Copy + Display + FromStr<Err = RfiError>,
{
    if let Some(unknown) = table.keys().find(|key| key.parse::<K>().is_err()) {
        return Err(RfiError::config(format!(
            "Unknown {} '{}' in reference data",
            kind, unknown
        )));
    }

    let mut records = Vec::with_capacity(N);
    for key in keys {
        let record = table.remove(key.to_string().as_str()).ok_or_else(|| {
            RfiError::config(format!("Reference data is missing {} '{}'", kind, key))
        })?;
        records.push(record);
    }

    records
        .try_into()
        .map_err(|_| RfiError::config(format!("Reference data has the wrong number of {} records", kind)))
}

fn location(labor: LaborStats, real_estate: RealEstate, incentives: Incentives) -> LocationRecord {
    LocationRecord {
        labor,
        real_estate,
        incentives,
    }
}

fn industry(jobs_multiplier: f64, income_multiplier: f64, tax_revenue_per_job: f64) -> IndustryRecord {
    IndustryRecord {
        jobs_multiplier,
        income_multiplier,
        tax_revenue_per_job,
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_tables_are_valid() {
        let data = ReferenceData::builtin();
        assert!(data.validate().is_ok());
    }

    #[test]
    fn test_builtin_lookups() {
        let data = ReferenceData::builtin();

        let juarez = data.location("Juarez").unwrap();
        assert_eq!(juarez.labor.average_wage, 6.25);
        assert_eq!(juarez.labor.manufacturing_workforce, 280_000);

        let automotive = data.industry("automotive").unwrap();
        assert_eq!(automotive.jobs_multiplier, 2.8);
        assert_eq!(automotive.tax_revenue_per_job, 3_200.0);

        assert_eq!(data.industry_record(Industry::Aerospace).income_multiplier, 2.1);
        assert_eq!(
            data.location_record(Location::LasCruces).incentives.infrastructure_grants,
            "$500,000 maximum"
        );
        assert_eq!(data.cross_border_profile().border_crossings.maquiladora_facilities, 330);
    }

    #[test]
    fn test_lookup_outside_fixed_set_is_not_found() {
        let data = ReferenceData::builtin();
        assert!(matches!(
            data.location("Tucson"),
            Err(RfiError::NotFound { ref kind, .. }) if kind == "location"
        ));
        assert!(matches!(
            data.industry("biotech"),
            Err(RfiError::NotFound { ref kind, .. }) if kind == "industry"
        ));
    }

    #[test]
    fn test_tables_round_trip_through_from_tables() {
        let data = ReferenceData::builtin();
        let rebuilt = ReferenceData::from_tables(data.to_tables()).unwrap();
        assert_eq!(rebuilt, data);
    }

    #[test]
    fn test_from_tables_rejects_missing_location() {
        let mut tables = ReferenceData::builtin().to_tables();
        tables.locations.remove("Las Cruces");

        let err = ReferenceData::from_tables(tables).unwrap_err();
        assert!(err.to_string().contains("missing location 'Las Cruces'"));
    }

    #[test]
    fn test_from_tables_rejects_unknown_industry() {
        let mut tables = ReferenceData::builtin().to_tables();
        let record = tables.industries["automotive"].clone();
        tables.industries.insert("biotech".to_string(), record);

        let err = ReferenceData::from_tables(tables).unwrap_err();
        assert!(err.to_string().contains("Unknown industry 'biotech'"));
    }

    #[test]
    fn test_from_tables_rejects_multiplier_not_above_one() {
        let mut tables = ReferenceData::builtin().to_tables();
        if let Some(record) = tables.industries.get_mut("logistics") {
            record.jobs_multiplier = 0.9;
        }

        let err = ReferenceData::from_tables(tables).unwrap_err();
        assert!(matches!(err, RfiError::ConfigError { .. }));
        assert!(err.to_string().contains("industries.logistics.jobs_multiplier"));
    }
}
