//! Integration tests: histogram results → per-variable plots.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use ws_core::{Channel, Error};
use ws_hist::{HistogramSet, bookings};
use ws_viz::{PlotFormat, PlotStyle, plot_channel};

fn tmp_dir(name: &str) -> PathBuf {
    let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_nanos();
    std::env::temp_dir().join(format!("wskim_viz_{}_{nanos}_{name}", std::process::id()))
}

fn booked_set(channel: Channel, partitions: &[String]) -> HistogramSet {
    let mut histograms = Vec::new();
    for partition in partitions {
        let label = channel.label(partition);
        for b in bookings(channel) {
            let mut h = ws_hist::Histogram::new(b.histogram_name(&label), b.spec(&label).bin_edges)
                .unwrap();
            h.fill(0.5 * (b.low + b.high), 1e-5);
            histograms.push(h);
        }
    }
    HistogramSet::new(histograms)
}

fn partitions() -> Vec<String> {
    vec!["400to800".to_string(), "6000".to_string()]
}

#[test]
fn one_svg_per_booked_variable() {
    let set = booked_set(Channel::Muon, &partitions());
    let out = tmp_dir("svg");
    let written = plot_channel(
        &set,
        Channel::Muon,
        &partitions(),
        &[],
        &PlotStyle::default(),
        PlotFormat::Svg,
        &out,
    )
    .unwrap();
    assert_eq!(written.len(), bookings(Channel::Muon).len());
    assert_eq!(written[0], out.join("pt_l_m.svg"));

    let svg = std::fs::read_to_string(out.join("m_inv_m.svg")).unwrap();
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains("W→μν (M400-800)"));
    assert!(svg.contains("Gen-level invariant M(ℓν) / GeV"));
}

#[test]
fn json_artifact_carries_the_stack() {
    let set = booked_set(Channel::Tau, &partitions());
    let out = tmp_dir("json");
    let variables = vec!["lhe_m_inv".to_string()];
    let written = plot_channel(
        &set,
        Channel::Tau,
        &partitions(),
        &variables,
        &PlotStyle::default(),
        PlotFormat::Json,
        &out,
    )
    .unwrap();
    assert_eq!(written, vec![out.join("lhe_m_inv_t.json")]);

    let text = std::fs::read_to_string(&written[0]).unwrap();
    let art: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(art["schema_version"], "wskim_stack_v1");
    assert_eq!(art["channel"], "tau");
    assert_eq!(art["samples"].as_array().unwrap().len(), 2);
    assert_eq!(art["samples"][1]["histogram"], "tnu_6000_lhe_m_inv");
    assert_eq!(art["bin_edges"].as_array().unwrap().len(), 201);
    // Both partitions fill the middle bin (4000 falls in bin 101).
    assert_eq!(art["total_y"][100], 2e-5);
}

#[test]
fn missing_histogram_writes_nothing() {
    let set = booked_set(Channel::Tau, &partitions()[..1]);
    let out = tmp_dir("missing");
    let err = plot_channel(
        &set,
        Channel::Tau,
        &partitions(),
        &[],
        &PlotStyle::default(),
        PlotFormat::Svg,
        &out,
    )
    .unwrap_err();
    assert!(matches!(err, Error::MissingHistogram(ref n) if n == "tnu_6000_lhe_pt_l"));
    assert!(!out.exists());
}
