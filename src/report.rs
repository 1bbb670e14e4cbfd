use crate::sweep::SweepRow;
use crate::trial::TrialSet;

pub fn format_estimates(estimates: &[f64]) -> String {
    let formatted = estimates
        .iter()
        .map(|e| format!("{:.7}", e))
        .collect::<Vec<String>>();
    format!("[{}]", formatted.join(", "))
}

pub fn summary_lines(set: &TrialSet) -> Vec<String> {
    let mut lines = vec![
        format!(
            "Results for n={}, m={}",
            set.config.package_size, set.config.category_count
        ),
        format_estimates(&set.estimates),
        format!("mean = {:.7}", set.mean()),
    ];
    if set.len() > 1 {
        lines.push(format!("std dev = {:.7}", set.std_dev()));
    }
    lines.push(format!("elapsed = {:.3}s", set.elapsed.as_secs_f64()));
    lines
}

pub fn print_summary(set: &TrialSet) {
    for line in summary_lines(set) {
        println!("{}", line);
    }
}

/// horizontal bars scaled so the largest value spans `width` columns.
pub fn bar_chart(labels: &[String], values: &[f64], width: usize) -> String {
    assert_eq!(labels.len(), values.len());
    let max = values.iter().cloned().fold(0.0f64, f64::max);
    let label_width = labels.iter().map(|l| l.len()).max().unwrap_or(0);

    let mut chart = String::new();
    for (label, &value) in labels.iter().zip(values.iter()) {
        let bar_len = if max > 0.0 {
            ((value / max) * width as f64).round() as usize
        } else {
            0
        };
        chart.push_str(&format!(
            "{:>lw$} | {} {:.7}\n",
            label,
            "#".repeat(bar_len),
            value,
            lw = label_width
        ));
    }
    chart
}

pub fn trial_chart(set: &TrialSet, width: usize) -> String {
    let labels = (0..set.len())
        .map(|i| format!("trial {}", i))
        .collect::<Vec<String>>();
    bar_chart(&labels, &set.estimates, width)
}

pub fn print_sweep(rows: &[SweepRow], width: usize) {
    println!("{:>4} {:>12} {:>12} {:>12}", "n", "mean", "exact", "error");
    for row in rows {
        println!(
            "{:>4} {:>12.7} {:>12.7} {:>12.7}",
            row.package_size,
            row.trials.mean(),
            row.exact,
            row.trials.mean() - row.exact
        );
    }
    let labels = rows
        .iter()
        .map(|row| format!("n={}", row.package_size))
        .collect::<Vec<String>>();
    let means = rows.iter().map(|row| row.trials.mean()).collect::<Vec<f64>>();
    print!("{}", bar_chart(&labels, &means, width));
}
