use nanocross::engine::config as core_config;

pub struct GenerateAppConfig {
    pub theta_degrees: f64,
    pub phi_degrees: f64,
    pub core_config: core_config::GenerateConfig,
}

pub struct AnalyzeAppConfig {
    pub core_config: core_config::AnalysisConfig,
}
