pub mod panels;

pub use panels::{
    ExplainabilityPanel, FeatureBar, InterventionRow, MatrixCell, ModelMetricsPanel,
    OutcomesPanel, ReferenceMarker, RiskOverviewPanel, StackedBar, TierSummary, TrendBar,
    TrendPanel,
};
