#[cfg(test)]
mod tests {
    use crate::application::DashboardAnalytics;
    use crate::config::{AppConfig, ValidationError};
    use crate::domain::analytics::{
        ClinicalObservation, ConfusionCounts, FeatureImportanceRecord, ImpactTier,
        InterventionOutcome, PatientRiskRecord, RiskPeriod, RiskTier, RiskTierCounts,
        TrendDirection,
    };
    use crate::domain::foundation::{ErrorCode, PatientId, Timestamp};

    fn patient(id: &str, score: f64) -> PatientRiskRecord {
        PatientRiskRecord::new(PatientId::new(id).unwrap(), score)
    }

    fn visit(date: &str) -> ClinicalObservation {
        ClinicalObservation::new(Timestamp::parse_date(date).unwrap())
    }

    // ─────────────────────────────────────────────────────────────────────
    // Construction
    // ─────────────────────────────────────────────────────────────────────

    #[test]
    fn test_from_default_config_matches_default() {
        let analytics = DashboardAnalytics::from_config(&AppConfig::default()).unwrap();
        assert_eq!(analytics, DashboardAnalytics::default());
        assert_eq!(analytics.precision().decimal_places(), 1);
    }

    #[test]
    fn test_from_config_rejects_inverted_risk_thresholds() {
        let mut config = AppConfig::default();
        config.risk.high_threshold = 0.3;
        config.risk.medium_threshold = 0.6;

        let err = DashboardAnalytics::from_config(&config).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidRiskThresholds { .. }));
    }

    #[test]
    fn test_from_config_rejects_negative_slope_tolerance() {
        let mut config = AppConfig::default();
        config.trend.slope_tolerance = -1.0;

        let err = DashboardAnalytics::from_config(&config).unwrap_err();
        assert_eq!(err, ValidationError::InvalidSlopeTolerance(-1.0));
    }

    // ─────────────────────────────────────────────────────────────────────
    // Model metrics
    // ─────────────────────────────────────────────────────────────────────

    #[test]
    fn test_model_metrics_panel_rounds_reference_matrix() {
        let counts = ConfusionCounts::new(245, 12, 1189, 8);
        let panel = DashboardAnalytics::default()
            .model_metrics_panel(Some(&counts))
            .unwrap()
            .unwrap();

        assert_eq!(panel.total_predictions, 1454);
        assert_eq!(panel.accuracy, 98.6);
        assert_eq!(panel.precision, Some(95.3));
        assert_eq!(panel.recall, Some(96.8));
        assert_eq!(panel.specificity, Some(99.0));
        assert_eq!(panel.f1_score, Some(0.961));
    }

    #[test]
    fn test_model_metrics_panel_lists_cells_in_matrix_order() {
        let counts = ConfusionCounts::new(245, 12, 1189, 8);
        let panel = DashboardAnalytics::default()
            .model_metrics_panel(Some(&counts))
            .unwrap()
            .unwrap();

        let labels: Vec<_> = panel.cells.iter().map(|c| c.label).collect();
        assert_eq!(
            labels,
            vec!["True Negative", "False Positive", "False Negative", "True Positive"]
        );
        let shares: Vec<_> = panel.cells.iter().map(|c| c.percentage).collect();
        assert_eq!(shares, vec![81.8, 0.8, 0.6, 16.9]);
        assert!(panel.cells[0].correct);
        assert!(!panel.cells[1].correct);
    }

    #[test]
    fn test_model_metrics_panel_absent_without_matrix() {
        let panel = DashboardAnalytics::default().model_metrics_panel(None).unwrap();
        assert!(panel.is_none());
    }

    #[test]
    fn test_model_metrics_panel_keeps_undefined_metrics_absent() {
        // No positive predictions and no actual positives
        let counts = ConfusionCounts::new(0, 0, 50, 0);
        let panel = DashboardAnalytics::default()
            .model_metrics_panel(Some(&counts))
            .unwrap()
            .unwrap();

        assert_eq!(panel.accuracy, 100.0);
        assert_eq!(panel.precision, None);
        assert_eq!(panel.recall, None);
        assert_eq!(panel.specificity, Some(100.0));
        assert_eq!(panel.f1_score, None);
    }

    #[test]
    fn test_model_metrics_panel_rejects_empty_matrix() {
        let counts = ConfusionCounts::default();
        let err = DashboardAnalytics::default()
            .model_metrics_panel(Some(&counts))
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidInput);
    }

    // ─────────────────────────────────────────────────────────────────────
    // Risk overview
    // ─────────────────────────────────────────────────────────────────────

    #[test]
    fn test_risk_overview_panel_for_reference_population() {
        let patients = vec![
            patient("P001", 0.85),
            patient("P002", 0.45),
            patient("P003", 0.92),
            patient("P004", 0.3),
        ];
        let panel = DashboardAnalytics::default()
            .risk_overview_panel(&patients)
            .unwrap();

        assert_eq!(panel.total_patients, 4);
        assert_eq!(panel.average_risk, Some(63.0));

        let tiers: Vec<_> = panel
            .tiers
            .iter()
            .map(|t| (t.tier, t.count, t.percentage))
            .collect();
        assert_eq!(
            tiers,
            vec![
                (RiskTier::High, 2, 50.0),
                (RiskTier::Medium, 1, 25.0),
                (RiskTier::Low, 1, 25.0),
            ]
        );
        assert_eq!(panel.tiers[0].label, "High Risk");
        assert_eq!((panel.high_threshold, panel.medium_threshold), (70.0, 40.0));
    }

    #[test]
    fn test_panels_report_configured_thresholds() {
        let mut config = AppConfig::default();
        config.risk.high_threshold = 0.8;
        config.impact.medium_threshold = 0.1;
        let analytics = DashboardAnalytics::from_config(&config).unwrap();

        let overview = analytics.risk_overview_panel(&[]).unwrap();
        assert_eq!(overview.high_threshold, 80.0);

        let explainability = analytics.explainability_panel(&[]).unwrap();
        assert_eq!(explainability.high_impact_threshold, 20.0);
        assert_eq!(explainability.medium_impact_threshold, 10.0);
    }

    #[test]
    fn test_risk_overview_panel_for_empty_population() {
        let panel = DashboardAnalytics::default().risk_overview_panel(&[]).unwrap();

        assert_eq!(panel.total_patients, 0);
        assert_eq!(panel.average_risk, None);
        assert!(panel.tiers.iter().all(|t| t.count == 0 && t.percentage == 0.0));
    }

    #[test]
    fn test_risk_overview_panel_rejects_score_above_one() {
        let err = DashboardAnalytics::default()
            .risk_overview_panel(&[patient("P001", 1.2)])
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::OutOfRange);
        assert_eq!(err.field(), "risk_score");
    }

    // ─────────────────────────────────────────────────────────────────────
    // Explainability
    // ─────────────────────────────────────────────────────────────────────

    #[test]
    fn test_explainability_panel_scales_bars_to_strongest_feature() {
        let features = vec![
            FeatureImportanceRecord::new("HbA1c Level", 0.28)
                .with_trend("increasing")
                .with_description("Glycated hemoglobin"),
            FeatureImportanceRecord::new("BMI", 0.10).with_trend(-0.4),
            FeatureImportanceRecord::new("Age", 0.02),
        ];
        let panel = DashboardAnalytics::default()
            .explainability_panel(&features)
            .unwrap();

        let bars: Vec<_> = panel
            .features
            .iter()
            .map(|f| (f.feature.as_str(), f.importance, f.bar_length, f.impact, f.trend))
            .collect();
        assert_eq!(
            bars,
            vec![
                ("HbA1c Level", 28.0, 100.0, ImpactTier::High, TrendDirection::Increasing),
                ("BMI", 10.0, 35.7, ImpactTier::Medium, TrendDirection::Decreasing),
                ("Age", 2.0, 7.1, ImpactTier::Low, TrendDirection::Stable),
            ]
        );
        let badges: Vec<_> = panel.features.iter().map(|f| f.impact_label).collect();
        assert_eq!(badges, vec!["HIGH", "MEDIUM", "LOW"]);
        assert_eq!(panel.impact_counts.high, 1);
        assert_eq!(panel.impact_counts.medium, 1);
        assert_eq!(panel.impact_counts.low, 1);
        assert_eq!(
            panel.features[0].description.as_deref(),
            Some("Glycated hemoglobin")
        );
    }

    #[test]
    fn test_explainability_panel_rejects_negative_importance() {
        let err = DashboardAnalytics::default()
            .explainability_panel(&[FeatureImportanceRecord::new("BMI", -0.1)])
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::OutOfRange);
    }

    // ─────────────────────────────────────────────────────────────────────
    // Trend
    // ─────────────────────────────────────────────────────────────────────

    #[test]
    fn test_trend_panel_orders_and_scales_points() {
        let observations = vec![
            visit("2025-09-01").with_metric("hba1c", 7.4),
            visit("2025-07-01").with_metric("hba1c", 8.2),
            visit("2025-08-01").with_metric("weight", 91.0),
            visit("2025-08-15").with_metric("hba1c", 7.8),
        ];
        let panel = DashboardAnalytics::default()
            .trend_panel(&observations, "hba1c", Some(7.0))
            .unwrap();

        assert_eq!(panel.metric, "hba1c");
        let points: Vec<_> = panel.points.iter().map(|p| (p.value, p.height)).collect();
        assert_eq!(points, vec![(8.2, 100.0), (7.8, 50.0), (7.4, 0.0)]);

        let reference = panel.reference.unwrap();
        assert_eq!(reference.value, 7.0);
        assert_eq!(reference.position, -50.0);
    }

    #[test]
    fn test_trend_panel_flat_series_sits_at_midpoint() {
        let observations = vec![
            visit("2025-07-01").with_metric("weight", 90.0),
            visit("2025-08-01").with_metric("weight", 90.0),
        ];
        let panel = DashboardAnalytics::default()
            .trend_panel(&observations, "weight", Some(85.0))
            .unwrap();

        assert!(panel.points.iter().all(|p| p.height == 50.0));
        assert_eq!(panel.reference.unwrap().position, 50.0);
    }

    #[test]
    fn test_trend_panel_without_matching_metric_is_empty() {
        let observations = vec![visit("2025-07-01").with_metric("weight", 90.0)];
        let panel = DashboardAnalytics::default()
            .trend_panel(&observations, "hba1c", Some(7.0))
            .unwrap();

        assert!(panel.points.is_empty());
        assert!(panel.reference.is_none());
    }

    #[test]
    fn test_trend_panel_rejects_non_finite_value() {
        let observations = vec![visit("2025-07-01").with_metric("hba1c", f64::NAN)];
        let err = DashboardAnalytics::default()
            .trend_panel(&observations, "hba1c", None)
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidInput);
    }

    // ─────────────────────────────────────────────────────────────────────
    // Outcomes
    // ─────────────────────────────────────────────────────────────────────

    #[test]
    fn test_outcomes_panel_for_reference_cohort() {
        let outcomes = vec![
            InterventionOutcome::new("Medication Adherence", 34, 38),
            InterventionOutcome::new("Lifestyle Counseling", 28, 31),
            InterventionOutcome::new("Emergency Consultations", 15, 16),
            InterventionOutcome::new("Care Plan Adjustments", 10, 10),
        ];
        let periods = vec![
            RiskPeriod::new("Jun", RiskTierCounts::new(18, 45, 67)),
            RiskPeriod::new("Jul", RiskTierCounts::new(21, 48, 71)),
            RiskPeriod::new("Aug", RiskTierCounts::new(19, 52, 74)),
            RiskPeriod::new("Sep", RiskTierCounts::new(23, 47, 78)),
        ];
        let panel = DashboardAnalytics::default()
            .outcomes_panel(&outcomes, &periods)
            .unwrap();

        let rates: Vec<_> = panel.interventions.iter().map(|r| r.rate).collect();
        assert_eq!(rates, vec![89.5, 90.3, 93.8, 100.0]);
        assert_eq!(panel.total_successful, 87);
        assert_eq!(panel.total_attempts, 95);
        assert_eq!(panel.overall_rate, Some(91.6));

        assert_eq!(panel.risk_distribution.len(), 4);
        let sep = &panel.risk_distribution[3];
        assert_eq!(sep.label, "Sep");
        assert_eq!(sep.high, 23);
        assert_eq!(sep.high_width, 15.5);
        assert_eq!(panel.high_risk_change, Some(4));
    }

    #[test]
    fn test_outcomes_panel_with_no_data() {
        let panel = DashboardAnalytics::default().outcomes_panel(&[], &[]).unwrap();

        assert!(panel.interventions.is_empty());
        assert_eq!(panel.overall_rate, None);
        assert!(panel.risk_distribution.is_empty());
        assert_eq!(panel.high_risk_change, None);
    }

    #[test]
    fn test_outcomes_panel_rejects_more_successes_than_attempts() {
        let err = DashboardAnalytics::default()
            .outcomes_panel(&[InterventionOutcome::new("X", 11, 10)], &[])
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::OutOfRange);
    }
}
