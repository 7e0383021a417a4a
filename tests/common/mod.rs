//! Shared GPX fixtures

#![allow(dead_code)]

/// GPX document with one `<trk>` per entry; each point is (lat, lon, ele)
pub fn gpx_document(stages: &[Vec<(f64, f64, Option<f64>)>]) -> String {
    let mut text = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <gpx version=\"1.1\" creator=\"tests\" xmlns=\"http://www.topografix.com/GPX/1/1\">\n",
    );
    for (i, stage) in stages.iter().enumerate() {
        text.push_str(&format!("  <trk>\n    <name>Stage {}</name>\n    <trkseg>\n", i + 1));
        for &(lat, lon, ele) in stage {
            match ele {
                Some(e) => text.push_str(&format!(
                    "      <trkpt lat=\"{}\" lon=\"{}\"><ele>{}</ele></trkpt>\n",
                    lat, lon, e
                )),
                None => text.push_str(&format!("      <trkpt lat=\"{}\" lon=\"{}\"></trkpt>\n", lat, lon)),
            }
        }
        text.push_str("    </trkseg>\n  </trk>\n");
    }
    text.push_str("</gpx>\n");
    text
}

/// Stages of the given sizes walking north-east in small steps
pub fn staged_route(sizes: &[usize]) -> String {
    let mut n = 0;
    let stages: Vec<Vec<(f64, f64, Option<f64>)>> = sizes
        .iter()
        .map(|&size| {
            (0..size)
                .map(|_| {
                    let i = n as f64;
                    n += 1;
                    (45.0 + i * 0.003, 6.0 + i * 0.002, Some(500.0 + (i * 0.7).sin() * 40.0))
                })
                .collect()
        })
        .collect();
    gpx_document(&stages)
}

pub fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() < epsilon
}
