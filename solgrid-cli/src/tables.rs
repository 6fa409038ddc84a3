use chrono::Month;
use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};
use solgrid_quantities::Percentage;

use crate::{
    advisor::{dispatch::Dispatch, sizing::BatterySizing},
    core::model::ModelKind,
    statistics::{
        diurnal::DiurnalProfile,
        energy::{EnergyComparison, EnergyResult},
        power::PowerStatistics,
        ramp::RampAnalysis,
    },
};

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .enforce_styling();
    table
}

fn missing() -> Cell {
    Cell::new("—").add_attribute(Attribute::Dim).set_alignment(CellAlignment::Center)
}

/// Row label of the energy reports.
#[derive(Copy, Clone, Debug)]
pub enum Subject<'a> {
    Model(ModelKind),

    /// External daily energy series, by its display name.
    Reference(&'a str),
}

impl Subject<'_> {
    fn cell(self) -> Cell {
        match self {
            Self::Model(kind) => Cell::new(kind).fg(kind.color()),
            Self::Reference(name) => Cell::new(name).add_attribute(Attribute::Italic),
        }
    }
}

pub fn build_energy_table(
    rows: &[(Subject<'_>, &EnergyResult, Option<PowerStatistics>)],
) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        "Model", "Annual", "Best day", "", "Worst day", "", "Max power", "Mean", "Min",
    ]);
    for (subject, energy, statistics) in rows {
        let mut cells = vec![
            subject.cell(),
            Cell::new(energy.annual).set_alignment(CellAlignment::Right).add_attribute(Attribute::Bold),
        ];
        for day in [energy.best_day(), energy.worst_day()] {
            match day {
                Some((date, energy)) => cells.extend([
                    Cell::new(date.format("%b %d")).add_attribute(Attribute::Dim),
                    Cell::new(energy).set_alignment(CellAlignment::Right),
                ]),
                None => cells.extend([missing(), missing()]),
            }
        }
        match statistics {
            Some(statistics) => cells.extend([
                Cell::new(statistics.max.1).set_alignment(CellAlignment::Right),
                Cell::new(statistics.mean).set_alignment(CellAlignment::Right),
                Cell::new(statistics.min.1)
                    .set_alignment(CellAlignment::Right)
                    .add_attribute(Attribute::Dim),
            ]),
            None => cells.extend([missing(), missing(), missing()]),
        }
        table.add_row(cells);
    }
    table
}

pub fn build_comparison_table(
    reference: ModelKind,
    rows: &[(Subject<'_>, EnergyComparison)],
) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Model".to_string(), format!("Δ vs {reference}"), "Relative".to_string()]);
    for (subject, comparison) in rows {
        table.add_row(vec![
            subject.cell(),
            Cell::new(comparison.difference).set_alignment(CellAlignment::Right),
            comparison.relative.map_or_else(missing, |relative| {
                Cell::new(relative).set_alignment(CellAlignment::Right)
            }),
        ]);
    }
    table
}

pub fn build_ramp_table(rows: &[(ModelKind, &RampAnalysis)]) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        "Model", "Swing at", "Before", "After", "Swing", "Max ramp at", "Max ramp",
    ]);
    for (kind, analysis) in rows {
        let mut cells = vec![Cell::new(kind).fg(kind.color())];
        match analysis.swing {
            Some(swing) => cells.extend([
                Cell::new(swing.timestamp.format("%b %d %H:%M")),
                Cell::new(swing.before).set_alignment(CellAlignment::Right).add_attribute(Attribute::Dim),
                Cell::new(swing.after).set_alignment(CellAlignment::Right).add_attribute(Attribute::Dim),
                Cell::new(swing.magnitude)
                    .set_alignment(CellAlignment::Right)
                    .add_attribute(Attribute::Bold),
            ]),
            None => cells.extend([missing(), missing(), missing(), missing()]),
        }
        match analysis.max_ramp {
            Some((timestamp, rate)) => cells.extend([
                Cell::new(timestamp.format("%b %d %H:%M")),
                Cell::new(rate).set_alignment(CellAlignment::Right).add_attribute(Attribute::Bold),
            ]),
            None => cells.extend([missing(), missing()]),
        }
        table.add_row(cells);
    }
    table
}

pub fn build_sizing_table(kind: ModelKind, sizing: &BatterySizing) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Sized on", "Swing", "Power rating", "Energy capacity", "Coverage", "Margin"]);
    table.add_row(vec![
        Cell::new(kind).fg(kind.color()),
        Cell::new(sizing.swing).set_alignment(CellAlignment::Right),
        Cell::new(sizing.power_rating).set_alignment(CellAlignment::Right).add_attribute(Attribute::Bold),
        Cell::new(sizing.energy_capacity).set_alignment(CellAlignment::Right).add_attribute(Attribute::Bold),
        Cell::new(sizing.coverage).set_alignment(CellAlignment::Right),
        Cell::new(sizing.margin).set_alignment(CellAlignment::Right).add_attribute(Attribute::Dim),
    ]);
    table
}

pub fn build_dispatch_table(dispatches: &[Dispatch], sizing: &BatterySizing) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        "Smoother", "Peak charge", "Peak discharge", "Utilization", "Excursion", "Feasible",
    ]);
    for dispatch in dispatches {
        let is_feasible = dispatch.is_feasible(sizing);
        table.add_row(vec![
            Cell::new(dispatch.smoother),
            Cell::new(dispatch.peak_charge).set_alignment(CellAlignment::Right),
            Cell::new(dispatch.peak_discharge).set_alignment(CellAlignment::Right),
            Cell::new(dispatch.utilization).set_alignment(CellAlignment::Right).fg(
                if dispatch.utilization <= Percentage::HUNDRED { Color::Green } else { Color::Red },
            ),
            Cell::new(dispatch.energy_excursion).set_alignment(CellAlignment::Right).fg(
                if dispatch.energy_excursion <= sizing.energy_capacity {
                    Color::Green
                } else {
                    Color::Red
                },
            ),
            Cell::new(if is_feasible { "yes" } else { "no" })
                .fg(if is_feasible { Color::Green } else { Color::Red }),
        ]);
    }
    table
}

/// Local hours down, months across.
pub fn build_profile_table(profile: &DiurnalProfile) -> Table {
    let months = profile.months().collect::<Vec<_>>();
    let mut table = new_table();
    let mut header = vec![format!("{} ({})", profile.variable, profile.variable.unit())];
    header.extend(months.iter().map(|month| {
        u8::try_from(*month)
            .ok()
            .and_then(|month| Month::try_from(month).ok())
            .map_or_else(|| month.to_string(), |month| month.name()[..3].to_string())
    }));
    table.set_header(header);
    for hour in 0..24 {
        let mut cells = vec![Cell::new(format!("{hour:02}:00")).add_attribute(Attribute::Dim)];
        cells.extend(months.iter().map(|month| {
            profile.mean(*month, hour).map_or_else(missing, |mean| {
                Cell::new(format!("{mean:.1}")).set_alignment(CellAlignment::Right)
            })
        }));
        table.add_row(cells);
    }
    table
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use chrono::NaiveDate;
    use solgrid_quantities::KilowattHours;

    use super::*;

    #[test]
    fn test_reference_rows() {
        let model = EnergyResult::default();
        let reference = EnergyResult::from_daily(
            BTreeMap::from([(NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(), KilowattHours(612.0))]),
            0,
        );
        let energy = build_energy_table(&[
            (Subject::Model(ModelKind::Empirical), &model, None),
            (Subject::Reference("Aurora"), &reference, None),
        ])
        .to_string();
        assert!(energy.contains("Aurora"));
        assert!(energy.contains("Jan 05"));

        let comparison = build_comparison_table(
            ModelKind::Empirical,
            &[(
                Subject::Reference("Aurora"),
                EnergyComparison::new(reference.annual, KilowattHours(600.0)),
            )],
        )
        .to_string();
        assert!(comparison.contains("Aurora"));
        assert!(comparison.contains("Δ vs OSM-MEPS"));
    }
}
