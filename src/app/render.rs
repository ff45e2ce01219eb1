// ==========================================
// 水泥熟料系数模拟系统 - 文本输出
// ==========================================
// 职责: 将 API 结果渲染为终端表格 / 标题行
// ==========================================

use crate::api::dto::format_delta;
use crate::api::{BaselineResponse, Co2Response, OptionsResponse, SimulationResponse};
use crate::domain::cement::CementTypeRow;
use crate::i18n::{t, t_with_args};
use std::fmt::Write;

/// 渲染品种表
pub fn render_rows(rows: &[CementTypeRow]) -> String {
    let headers = [
        t("table.cement_type"),
        t("table.clinker_consumption"),
        t("table.cement_production"),
        t("table.clinker_factor"),
    ];

    let body: Vec<[String; 4]> = rows
        .iter()
        .map(|r| {
            [
                r.cement_type.clone(),
                format!("{:.2}", r.clinker_consumption),
                format!("{:.2}", r.cement_production),
                format!("{:.2}", r.clinker_factor),
            ]
        })
        .collect();

    let mut widths = headers.clone().map(|h| h.chars().count());
    for line in &body {
        for (i, cell) in line.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, &headers, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_line(&mut out, &rule, &widths);
    for line in &body {
        push_line(&mut out, line, &widths);
    }
    out
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    for (idx, (cell, width)) in cells.iter().zip(widths).enumerate() {
        let pad = " ".repeat(width.saturating_sub(cell.chars().count()));
        if idx == 0 {
            // 首列左对齐
            out.push_str(cell);
            out.push_str(&pad);
        } else {
            out.push_str("  ");
            out.push_str(&pad);
            out.push_str(cell);
        }
    }
    out.push('\n');
}

pub fn render_options(options: &OptionsResponse) -> String {
    let data_types: Vec<String> = options.data_types.iter().map(|d| d.to_string()).collect();
    let mut out = String::new();
    let _ = writeln!(out, "{}: {}", t("options.months"), options.months.join(", "));
    let _ = writeln!(out, "{}: {}", t("options.periods"), options.periods.join(", "));
    let _ = writeln!(out, "{}: {}", t("options.data_types"), data_types.join(", "));
    out
}

pub fn render_baseline(baseline: &BaselineResponse) -> String {
    let mut out = render_rows(&baseline.rows);
    out.push('\n');
    out.push_str(&t_with_args(
        "headline.baseline",
        &[("value", baseline.consolidated_factor_display.as_str())],
    ));
    out.push('\n');
    out
}

pub fn render_simulation(simulation: &SimulationResponse) -> String {
    let headline_key = match simulation.mode {
        crate::domain::types::SimulationMode::TargetConsolidated => "headline.target_result",
        crate::domain::types::SimulationMode::PerTypeOverride => "headline.per_type_result",
    };

    let mut out = String::new();
    let _ = writeln!(out, "{}", t("table.before"));
    out.push_str(&render_rows(&simulation.before));
    out.push('\n');
    let _ = writeln!(out, "{}", t("table.after"));
    out.push_str(&render_rows(&simulation.after));
    out.push('\n');
    out.push_str(&t_with_args(
        headline_key,
        &[("value", simulation.consolidated_factor_display.as_str())],
    ));
    out.push('\n');
    let delta = format_delta(simulation.consolidated_delta);
    let clinker = format_delta(simulation.clinker_delta);
    out.push_str(&t_with_args(
        "headline.delta",
        &[("value", delta.as_str()), ("clinker", clinker.as_str())],
    ));
    out.push('\n');
    out
}

pub fn render_co2(co2: &Co2Response) -> String {
    let mut out = t_with_args("headline.co2", &[("value", co2.co2_total_display.as_str())]);
    out.push('\n');
    out
}
