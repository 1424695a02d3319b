//! Cover Estimation
//!
//! Turns the day's reservations plus a historical walk-in ratio into an
//! expected cover count for a service period.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use shared::models::Reservation;
use shared::types::ServicePeriod;

use super::{round_dp, round_whole};

/// Walk-in ratio used when no usable history exists
pub const DEFAULT_WALK_IN_RATIO: f64 = 0.20;
/// Upper clamp for the walk-in ratio; beyond this the gross-up formula
/// becomes unstable
pub const WALK_IN_RATIO_MAX: f64 = 0.7;

/// Lunch covers reservations before this hour, dinner from it onward
const DINNER_FROM_HOUR: u32 = 15;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoverEstimation {
    pub reserved_covers: i64,
    pub walk_in_ratio: f64,
    pub estimated_walk_ins: i64,
    /// After walk-in gross-up and safety buffer
    pub estimated_total: i64,
    pub service_period: ServicePeriod,
}

fn in_period(reservation: &Reservation, period: ServicePeriod) -> bool {
    match period {
        ServicePeriod::AllDay => true,
        // Unparseable timestamps are kept for all_day but can't be
        // assigned to a period; they are dropped here
        ServicePeriod::Lunch => reservation.hour().is_some_and(|h| h < DINNER_FROM_HOUR),
        ServicePeriod::Dinner => reservation.hour().is_some_and(|h| h >= DINNER_FROM_HOUR),
    }
}

/// Estimate total covers from reservations and the walk-in ratio.
///
/// A ratio of 0.30 means 30% of actual covers are walk-ins, so
/// `actual = reserved / (1 - ratio)`; the ratio is clamped to
/// [0, `WALK_IN_RATIO_MAX`] before use.
pub fn estimate_covers(
    reservations: &[Reservation],
    walk_in_ratio: f64,
    safety_buffer: f64,
    service_period: ServicePeriod,
) -> CoverEstimation {
    let reserved_covers: i64 = reservations
        .iter()
        .filter(|r| !r.is_cancelled() && in_period(r, service_period))
        .map(|r| r.guest_count.max(0))
        .sum();

    let clamped_ratio = walk_in_ratio.clamp(0.0, WALK_IN_RATIO_MAX);
    let with_walk_ins = if clamped_ratio > 0.0 {
        round_whole(reserved_covers as f64 / (1.0 - clamped_ratio))
    } else {
        reserved_covers
    };

    let estimated_walk_ins = with_walk_ins - reserved_covers;
    let estimated_total = round_whole(with_walk_ins as f64 * (1.0 + safety_buffer));

    CoverEstimation {
        reserved_covers,
        walk_in_ratio: clamped_ratio,
        estimated_walk_ins,
        estimated_total,
        service_period,
    }
}

/// Group non-cancelled reserved covers by date, keeping only dates that
/// fall on `day_of_week` (0 = Sunday .. 6 = Saturday)
pub fn reserved_covers_by_date(
    reservations: &[Reservation],
    day_of_week: u32,
) -> HashMap<String, i64> {
    use chrono::Datelike;

    let mut by_date: HashMap<String, i64> = HashMap::new();
    for r in reservations {
        if r.is_cancelled() {
            continue;
        }
        let Ok(dt) =
            chrono::NaiveDateTime::parse_from_str(&r.reservation_time, "%Y-%m-%dT%H:%M:%S")
        else {
            continue;
        };
        if dt.date().weekday().num_days_from_sunday() != day_of_week {
            continue;
        }
        *by_date.entry(dt.date().to_string()).or_insert(0) += r.guest_count.max(0);
    }
    by_date
}

/// Derive the walk-in ratio from paired per-date history.
///
/// Only dates where the POS actual exceeds the reserved count carry a
/// signal; `ratio = (actual - reserved) / actual`, averaged across the
/// usable dates. Falls back to `DEFAULT_WALK_IN_RATIO` when history is
/// empty or inconsistent.
pub fn walk_in_ratio_from_history(
    reserved_by_date: &HashMap<String, i64>,
    actual_by_date: &HashMap<String, i64>,
) -> f64 {
    let mut total_reserved = 0i64;
    let mut total_actual = 0i64;

    for (date, reserved) in reserved_by_date {
        if let Some(actual) = actual_by_date.get(date)
            && *actual > *reserved
        {
            total_reserved += reserved;
            total_actual += actual;
        }
    }

    if total_actual == 0 {
        return DEFAULT_WALK_IN_RATIO;
    }

    let ratio = (total_actual - total_reserved) as f64 / total_actual as f64;
    round_dp(ratio.clamp(0.0, WALK_IN_RATIO_MAX), 3)
}

/// Severity of a prep alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Info,
    Warning,
    Critical,
}

/// Transient advisory shown with a generated prep list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrepAlert {
    #[serde(rename = "type")]
    pub kind: String,
    pub severity: AlertSeverity,
    pub message: String,
}

/// Flag estimated volume far off the historical average for that weekday
pub fn detect_volume_anomalies(
    estimated_covers: i64,
    historical_avg_covers: f64,
    day_label: &str,
) -> Vec<PrepAlert> {
    let mut alerts = Vec::new();
    if historical_avg_covers <= 0.0 {
        return alerts;
    }

    let ratio = estimated_covers as f64 / historical_avg_covers;
    let average = round_whole(historical_avg_covers);

    if ratio >= 2.0 {
        alerts.push(PrepAlert {
            kind: "volume".into(),
            severity: AlertSeverity::Critical,
            message: format!(
                "Volume exceptionnel : {estimated_covers} couverts estimés vs {average} en moyenne le {day_label}. Prévoir du renfort en cuisine."
            ),
        });
    } else if ratio >= 1.4 {
        alerts.push(PrepAlert {
            kind: "volume".into(),
            severity: AlertSeverity::Warning,
            message: format!(
                "Volume supérieur à la moyenne : {estimated_covers} couverts estimés vs {average} habituellement le {day_label} (+{}%).",
                round_whole((ratio - 1.0) * 100.0)
            ),
        });
    } else if ratio <= 0.5 && estimated_covers > 0 {
        alerts.push(PrepAlert {
            kind: "volume".into(),
            severity: AlertSeverity::Info,
            message: format!(
                "Volume faible : seulement {estimated_covers} couverts estimés vs {average} en moyenne le {day_label}. Réduire la prep en conséquence."
            ),
        });
    }

    alerts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reservation(time: &str, guests: i64, status: &str) -> Reservation {
        Reservation {
            id: "r".into(),
            restaurant_id: "resto-1".into(),
            reservation_time: time.into(),
            guest_count: guests,
            status: status.into(),
            customer_name: None,
            customer_notes: None,
        }
    }

    #[test]
    fn cancelled_and_off_period_reservations_excluded() {
        let reservations = vec![
            reservation("2026-02-27T12:00:00", 4, "confirmed"),
            reservation("2026-02-27T19:30:00", 6, "confirmed"),
            reservation("2026-02-27T20:00:00", 8, "cancelled"),
        ];

        let lunch = estimate_covers(&reservations, 0.0, 0.0, ServicePeriod::Lunch);
        assert_eq!(lunch.reserved_covers, 4);

        let dinner = estimate_covers(&reservations, 0.0, 0.0, ServicePeriod::Dinner);
        assert_eq!(dinner.reserved_covers, 6);

        let all_day = estimate_covers(&reservations, 0.0, 0.0, ServicePeriod::AllDay);
        assert_eq!(all_day.reserved_covers, 10);
    }

    #[test]
    fn walk_in_gross_up_and_buffer() {
        let reservations = vec![reservation("2026-02-27T19:00:00", 40, "confirmed")];

        // 20% walk-ins: 40 / 0.8 = 50; +10% buffer = 55
        let est = estimate_covers(&reservations, 0.20, 0.10, ServicePeriod::AllDay);
        assert_eq!(est.reserved_covers, 40);
        assert_eq!(est.estimated_walk_ins, 10);
        assert_eq!(est.estimated_total, 55);
    }

    #[test]
    fn ratio_clamped_before_gross_up() {
        let reservations = vec![reservation("2026-02-27T19:00:00", 30, "confirmed")];
        let est = estimate_covers(&reservations, 0.95, 0.0, ServicePeriod::AllDay);
        assert_eq!(est.walk_in_ratio, WALK_IN_RATIO_MAX);
        assert_eq!(est.estimated_total, 100);
    }

    #[test]
    fn history_ratio_default_when_empty() {
        let ratio = walk_in_ratio_from_history(&HashMap::new(), &HashMap::new());
        assert_eq!(ratio, DEFAULT_WALK_IN_RATIO);
    }

    #[test]
    fn history_ratio_from_paired_dates() {
        let reserved = HashMap::from([("2026-02-20".to_string(), 40i64)]);
        let actual = HashMap::from([("2026-02-20".to_string(), 50i64)]);
        let ratio = walk_in_ratio_from_history(&reserved, &actual);
        assert_eq!(ratio, 0.2);
    }

    #[test]
    fn volume_anomaly_bands() {
        assert_eq!(
            detect_volume_anomalies(100, 40.0, "vendredi")[0].severity,
            AlertSeverity::Critical
        );
        assert_eq!(
            detect_volume_anomalies(60, 40.0, "vendredi")[0].severity,
            AlertSeverity::Warning
        );
        assert_eq!(
            detect_volume_anomalies(15, 40.0, "vendredi")[0].severity,
            AlertSeverity::Info
        );
        assert!(detect_volume_anomalies(45, 40.0, "vendredi").is_empty());
        assert!(detect_volume_anomalies(50, 0.0, "vendredi").is_empty());
    }
}
