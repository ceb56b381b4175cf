//! Linear trend forecasting over monthly totals
//!
//! The x axis is the position of a month in the series, not its calendar
//! distance from the first month. A month with no expenses is absent from the
//! series, so gaps shorten the axis and tilt the fitted line.

use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{ForecastPoint, MonthlySeries};

/// Observed months needed to fit a line
pub const MIN_OBSERVATIONS: usize = 2;

/// Longest projection accepted, ten years of months
pub const MAX_HORIZON: usize = 120;

/// Least-squares line `y = intercept + slope * x`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearTrend {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearTrend {
    /// Fit through `(i, values[i])` with the closed-form OLS solution
    pub fn fit(values: &[f64]) -> Result<Self> {
        let n = values.len();
        if n < MIN_OBSERVATIONS {
            return Err(Error::InsufficientData {
                required: MIN_OBSERVATIONS,
                observed: n,
            });
        }

        let x_mean = (n - 1) as f64 / 2.0;
        let y_mean = values.iter().sum::<f64>() / n as f64;

        let (sxy, sxx) = values
            .iter()
            .enumerate()
            .fold((0.0, 0.0), |(sxy, sxx), (i, y)| {
                let dx = i as f64 - x_mean;
                (sxy + dx * (y - y_mean), sxx + dx * dx)
            });

        // sxx > 0 whenever n >= 2 since the x values are distinct
        let slope = sxy / sxx;
        Ok(Self {
            slope,
            intercept: y_mean - slope * x_mean,
        })
    }

    pub fn value_at(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }

    /// Evaluate the line at the `horizon` positions after `observed` points
    pub fn project(&self, observed: usize, horizon: usize) -> Vec<ForecastPoint> {
        (1..=horizon)
            .map(|offset| ForecastPoint {
                offset,
                amount: self.value_at((observed + offset - 1) as f64),
            })
            .collect()
    }
}

/// Reject horizons beyond [`MAX_HORIZON`]
pub fn check_horizon(horizon: usize) -> Result<()> {
    if horizon > MAX_HORIZON {
        return Err(Error::Validation(format!(
            "Forecast horizon must be at most {} months, got {}",
            MAX_HORIZON, horizon
        )));
    }
    Ok(())
}

/// Project `horizon` monthly totals past the end of `series`
pub fn forecast(series: &MonthlySeries, horizon: usize) -> Result<Vec<ForecastPoint>> {
    fit_and_project(series, horizon).map(|(_, points)| points)
}

/// Like [`forecast`] but also returns the fitted line
pub fn fit_and_project(
    series: &MonthlySeries,
    horizon: usize,
) -> Result<(LinearTrend, Vec<ForecastPoint>)> {
    check_horizon(horizon)?;
    let values: Vec<f64> = series.totals().collect();
    let trend = LinearTrend::fit(&values)?;
    debug!(
        "Fitted trend over {} months: slope={:.4} intercept={:.4}",
        values.len(),
        trend.slope,
        trend.intercept
    );
    Ok((trend, trend.project(values.len(), horizon)))
}
