//! Integration tests: skim files → histograms → text export.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use approx::assert_relative_eq;
use ws_core::{Channel, Error, MissingEt, Particle, SkimRow};
use ws_hist::{ExportConfig, export_histograms, fill_channel, read_histograms, write_histograms};

fn tmp_dir(name: &str) -> PathBuf {
    let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_nanos();
    let dir = std::env::temp_dir().join(format!("wskim_hist_{}_{nanos}_{name}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn row(m_inv: f64, weight: f64) -> SkimRow {
    let lepton = Particle { pdg_id: 15, status: 1, pt: 300.0, eta: 0.1, phi: 0.4, mass: 1.777 };
    let neutrino = Particle { pdg_id: -16, status: 1, pt: 250.0, eta: -0.7, phi: -2.6, mass: 0.0 };
    SkimRow {
        lepton,
        neutrino,
        met: MissingEt { pt: 240.0, phi: -2.5 },
        p4_l: lepton.p4(),
        p4_n: neutrino.p4(),
        p4: lepton.p4() + neutrino.p4(),
        m_inv,
        scale_pdf: m_inv,
        mt: 500.0,
        mt_met: 480.0,
        weight,
    }
}

#[test]
fn tau_histograms_and_export() {
    let skim_dir = tmp_dir("skims");
    let partitions = vec!["400to800".to_string(), "6000".to_string()];
    ws_io::write_skim(
        &skim_dir.join(Channel::Tau.skim_file_name("400to800", "mgmlm")),
        Channel::Tau,
        "400to800",
        &[row(410.0, 0.5), row(415.0, 0.5), row(9000.0, 0.5)],
    )
    .unwrap();
    ws_io::write_skim(
        &skim_dir.join(Channel::Tau.skim_file_name("6000", "mgmlm")),
        Channel::Tau,
        "6000",
        &[],
    )
    .unwrap();

    let hists = fill_channel(Channel::Tau, &partitions, "mgmlm", &skim_dir).unwrap();
    assert_eq!(hists.len(), 32);
    assert_eq!(hists[0].name, "tnu_400to800_lhe_pt_l");
    assert_eq!(hists[16].name, "tnu_6000_lhe_pt_l");

    let results = skim_dir.join(Channel::Tau.histogram_file_name("mgmlm"));
    write_histograms(&results, &hists).unwrap();
    let set = read_histograms(&results).unwrap();

    let m = set.get("tnu_400to800_lhe_m_inv").unwrap();
    assert_eq!(m.n_bins(), 200);
    // Bin 11 is [400, 440).
    assert_relative_eq!(m.bin_content(11), 1.0);
    assert_relative_eq!(m.sumw2[10], 0.5);
    assert_relative_eq!(m.overflow, 0.5);
    assert_eq!(m.entries, 3.0);
    let pdg = set.get("tnu_400to800_lhe_pdgId_n").unwrap();
    // -16 falls in [-16, -15), bin 5.
    assert_relative_eq!(pdg.bin_content(5), 1.5);

    let cfg = ExportConfig {
        prefix: "tnu".into(),
        series_prefix: "t".into(),
        partitions: partitions.clone(),
        ..Default::default()
    };
    let out_dir = tmp_dir("export");
    let written = export_histograms(&set, &cfg, &out_dir).unwrap();
    assert_eq!(written, vec![out_dir.join("out_t400_mg.txt"), out_dir.join("out_t6000_mg.txt")]);

    let text = std::fs::read_to_string(&written[0]).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 200);
    assert_eq!(lines[0], "20 0");
    assert_eq!(lines[10], "420 1");
    let empty = std::fs::read_to_string(&written[1]).unwrap();
    assert!(empty.lines().all(|l| l.ends_with(" 0")));
}

#[test]
fn channel_mismatch_is_rejected() {
    let skim_dir = tmp_dir("mismatch");
    // A muon skim placed under the tau file name.
    ws_io::write_skim(
        &skim_dir.join(Channel::Tau.skim_file_name("400to800", "mgmlm")),
        Channel::Muon,
        "400to800",
        &[],
    )
    .unwrap();
    let err =
        fill_channel(Channel::Tau, &["400to800".to_string()], "mgmlm", &skim_dir).unwrap_err();
    assert!(matches!(err, Error::SchemaMismatch(_)));
}

#[test]
fn missing_skim_file() {
    let skim_dir = tmp_dir("missing");
    let err = fill_channel(Channel::Muon, &["6000".to_string()], "mgmlm", &skim_dir).unwrap_err();
    assert!(matches!(err, Error::MissingInput(_)));
}
