use crate::core::assembler::ResponseAssembler;
use crate::core::extractor::PromptExtractor;
use crate::core::impact::ImpactCalculator;
use crate::core::reference::ReferenceData;
use crate::core::ConfigProvider;
use crate::domain::model::{EconomicImpact, RequestOverrides, RequestParameters, RfiResponse};
use crate::utils::error::Result;
use std::sync::Arc;
use std::time::Instant;

/// Entry point tying extraction, impact calculation and assembly together
/// over one shared, read-only [`ReferenceData`].
pub struct RfiAccelerator {
    extractor: PromptExtractor,
    calculator: ImpactCalculator,
    assembler: ResponseAssembler,
}

impl RfiAccelerator {
    pub fn new(reference: Arc<ReferenceData>) -> Result<Self> {
        Ok(Self {
            extractor: PromptExtractor::new()?,
            calculator: ImpactCalculator::new(Arc::clone(&reference)),
            assembler: ResponseAssembler::new(reference),
        })
    }

    pub fn with_builtin_data() -> Result<Self> {
        Self::new(Arc::new(ReferenceData::builtin()))
    }

    /// 依設定載入參考資料；未指定檔案時使用內建資料
    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        let reference = match config.reference_data_file() {
            Some(path) => {
                tracing::info!("📁 Loading reference data from: {}", path);
                ReferenceData::from_file(path)?
            }
            None => ReferenceData::builtin(),
        };
        Self::new(Arc::new(reference))
    }

    pub fn extract(&self, prompt: &str) -> RequestParameters {
        self.extractor.extract(prompt)
    }

    pub fn compute_impact(&self, params: &RequestParameters) -> Result<EconomicImpact> {
        self.calculator.compute(params)
    }

    pub fn assemble(&self, params: &RequestParameters) -> Result<RfiResponse> {
        self.assembler.assemble(params)
    }

    /// Extracts parameters from the prompt, applies overrides on top and assembles.
    pub fn process(&self, prompt: &str, overrides: &RequestOverrides) -> Result<RfiResponse> {
        let started = Instant::now();
        tracing::info!("Processing RFI request ({} chars)", prompt.len());

        let extracted = self.extract(prompt);
        let params = overrides.apply_to(&extracted);
        if !overrides.is_empty() {
            tracing::debug!("Applied overrides: {:?}", overrides);
        }

        let response = self.assemble(&params)?;
        tracing::info!(
            "✅ RFI response for {} {} in {} assembled in {:?}",
            response.project_summary.employment,
            response.project_summary.industry,
            response.project_summary.location,
            started.elapsed()
        );
        Ok(response)
    }

    /// Re-assembles a previous response with some parameters replaced.
    pub fn recompute(&self, previous: &RfiResponse, overrides: &RequestOverrides) -> Result<RfiResponse> {
        let params = overrides.apply_to(&previous.parameters());
        tracing::info!("🔧 Recomputing RFI response with overrides: {:?}", overrides);
        self.assemble(&params)
    }
}
