//! End-to-end tests of the clustering pipeline through the public API.

use bureaux::clustering::{build_groups, cluster_all, cluster_group, ClusterParams};
use bureaux::loader::load_records;
use bureaux::report::{render_routes, write_clusters_json, write_routes};
use bureaux::{Cluster, RawRecord, Station};
use serde_json::{json, Value};

/// Meters per degree of latitude on the haversine sphere
const M_PER_DEG_LAT: f64 = 111_194.93;

fn record(objectid: u64, adresse: &str, cp: &str, lat: f64, lon: f64) -> RawRecord {
    serde_json::from_value(json!({
        "objectid": objectid,
        "id_bv": format!("{}_{}", cp, objectid),
        "num_bv": objectid,
        "lib": format!("Bureau {}", objectid),
        "adresse": adresse,
        "cp": cp,
        "geo_point_2d": { "lat": lat, "lon": lon }
    }))
    .unwrap()
}

/// `count` stations in one postal code spread along a meridian, `step_m` apart
fn line(cp: &str, first_id: u64, count: usize, start_lat: f64, step_m: f64) -> Vec<RawRecord> {
    (0..count)
        .map(|i| {
            let id = first_id + i as u64;
            record(
                id,
                &format!("{} avenue {}", id, cp),
                cp,
                start_lat + i as f64 * step_m / M_PER_DEG_LAT,
                2.3400,
            )
        })
        .collect()
}

/// A mixed city-sized fixture: dense, sparse and isolated postal codes
fn city() -> Vec<RawRecord> {
    let mut records = Vec::new();
    records.extend(line("75001", 1, 9, 48.8600, 120.0));
    records.extend(line("75002", 100, 14, 48.8700, 450.0));
    records.extend(line("75003", 200, 1, 48.8650, 0.0));
    records.extend(line("75004", 300, 5, 48.8550, 2500.0));
    records.push(record(400, "2 rue perdue", "75001", 48.9500, 2.3400));
    records
}

fn ids(clusters: &[Cluster]) -> Vec<Value> {
    clusters
        .iter()
        .flat_map(|c| c.stations().iter().map(|s| s.objectid.clone()))
        .collect()
}

#[test]
fn test_three_close_stations_make_one_round() {
    let groups = build_groups(vec![
        record(1, "1 rue A", "75001", 48.86000, 2.34000),
        record(2, "2 rue A", "75001", 48.86020, 2.34020),
        record(3, "3 rue A", "75001", 48.85980, 2.34030),
    ]);
    let result = cluster_all(groups, &ClusterParams::default());

    assert_eq!(result["75001"].len(), 1);
    assert_eq!(result["75001"][0].len(), 3);
    assert!(result["75001"][0].max_pairwise_distance() <= 1000.0);
}

#[test]
fn test_far_station_is_forced_into_only_round() {
    let mut records = line("75001", 1, 6, 48.8600, 35.0);
    records.push(record(7, "7 rue loin", "75001", 48.8600 + 5000.0 / M_PER_DEG_LAT, 2.34));

    let clusters = cluster_group(
        build_groups(records).remove("75001").unwrap(),
        &ClusterParams::default(),
    );

    // The only full-size round takes the far station past the limit
    assert_eq!(clusters.len(), 1);
    assert_eq!(clusters[0].len(), 7);
    assert!(clusters[0].is_forced());
    assert!(clusters[0].max_pairwise_distance() > 1000.0);
}

#[test]
fn test_single_station_group() {
    let result = cluster_all(
        build_groups(vec![record(1, "1 rue A", "75003", 48.86, 2.34)]),
        &ClusterParams::default(),
    );

    assert_eq!(result["75003"].len(), 1);
    assert_eq!(result["75003"][0].len(), 1);
}

#[test]
fn test_duplicate_address_keeps_first_record() {
    let groups = build_groups(vec![
        record(1, "1 rue A", "75001", 48.8600, 2.3400),
        record(2, "1 rue A", "75001", 48.8601, 2.3401),
    ]);

    assert_eq!(groups["75001"].len(), 1);
    assert_eq!(groups["75001"][0].objectid, json!(1));
}

#[test]
fn test_every_station_placed_exactly_once() {
    let groups = build_groups(city());
    let mut expected: Vec<(String, Value)> = groups
        .iter()
        .flat_map(|(cp, s)| s.iter().map(move |s| (cp.clone(), s.objectid.clone())))
        .collect();

    let result = cluster_all(groups, &ClusterParams::default());
    let mut placed: Vec<(String, Value)> = result
        .iter()
        .flat_map(|(cp, c)| ids(c).into_iter().map(move |id| (cp.clone(), id)))
        .collect();

    let key = |e: &(String, Value)| (e.0.clone(), e.1.as_u64());
    expected.sort_by_key(key);
    placed.sort_by_key(key);
    assert_eq!(placed, expected);
}

#[test]
fn test_unforced_rounds_respect_distance_limit() {
    let params = ClusterParams::default();
    let result = cluster_all(build_groups(city()), &params);

    for clusters in result.values() {
        for cluster in clusters.iter().filter(|c| c.len() >= params.min_size) {
            if cluster.is_forced() {
                continue;
            }
            assert!(cluster.max_pairwise_distance() <= params.max_distance_m);
        }
    }
}

#[test]
fn test_isolated_station_is_identifiable() {
    let result = cluster_all(build_groups(city()), &ClusterParams::default());

    // 75001 has one station far north of the others
    assert!(result["75001"].iter().any(Cluster::is_forced));
    // 75004 stations are all 2.5 km apart: nothing can merge cleanly
    let forced: Vec<_> = result["75004"].iter().filter(|c| c.is_forced()).collect();
    assert_eq!(forced.len(), 1);
    assert_eq!(result["75004"].len(), 1);
}

#[test]
fn test_records_without_coordinates_never_appear() {
    let mut records = city();
    records.push(
        serde_json::from_value(json!({
            "objectid": 999, "adresse": "sans coordonnees", "cp": "75001",
            "geo_point_2d": { "lat": 48.86 }
        }))
        .unwrap(),
    );

    let result = cluster_all(build_groups(records), &ClusterParams::default());
    assert!(!ids(&result["75001"]).contains(&json!(999)));
}

#[test]
fn test_output_is_deterministic() {
    let dir = tempfile::tempdir().unwrap();
    let mut outputs = Vec::new();

    for run in 0..2 {
        let result = cluster_all(build_groups(city()), &ClusterParams::default());
        let json_path = dir.path().join(format!("clusters_{}.json", run));
        let text_path = dir.path().join(format!("routes_{}.txt", run));
        write_clusters_json(&json_path, &result).unwrap();
        write_routes(&text_path, &result).unwrap();

        outputs.push((
            std::fs::read(&json_path).unwrap(),
            std::fs::read(&text_path).unwrap(),
        ));
    }

    assert_eq!(outputs[0], outputs[1]);
}

#[test]
fn test_json_output_shape() {
    let result = cluster_all(
        build_groups(vec![
            record(1, "1 rue A", "75001", 48.86000, 2.34000),
            record(2, "2 rue A", "75001", 48.86020, 2.34020),
        ]),
        &ClusterParams::default(),
    );

    let value = serde_json::to_value(&result).unwrap();
    assert_eq!(
        value,
        json!({
            "75001": [[
                {
                    "objectid": 1, "id_bv": "75001_1", "num_bv": 1, "lib": "Bureau 1",
                    "adresse": "1 rue A", "cp": "75001", "lat": 48.86, "lon": 2.34
                },
                {
                    "objectid": 2, "id_bv": "75001_2", "num_bv": 2, "lib": "Bureau 2",
                    "adresse": "2 rue A", "cp": "75001", "lat": 48.8602, "lon": 2.3402
                }
            ]]
        })
    );

    let back: std::collections::BTreeMap<String, Vec<Vec<Station>>> =
        serde_json::from_value(value).unwrap();
    assert_eq!(back["75001"][0].len(), 2);
}

#[test]
fn test_routes_report() {
    let result = cluster_all(
        build_groups(vec![
            record(1, "1 rue A", "75001", 48.86000, 2.34000),
            record(2, "2 rue A", "75001", 48.86020, 2.34020),
            record(3, "9 rue B", "75002", 48.87000, 2.34000),
        ]),
        &ClusterParams::default(),
    );

    assert_eq!(
        render_routes(&result),
        "75001\nTrajet 1:\n1 rue A (Bureau 1) -> 2 rue A (Bureau 2)\n\n75002\n"
    );
}

#[test]
fn test_orphan_can_grow_round_past_max_size() {
    // Seeding caps the round at 6; the seventh station is merged back in
    let clusters = cluster_group(
        build_groups(line("75001", 1, 7, 48.86, 10.0)).remove("75001").unwrap(),
        &ClusterParams::default(),
    );

    assert_eq!(clusters.len(), 1);
    assert_eq!(clusters[0].len(), 7);
    assert!(!clusters[0].is_forced());
}

#[test]
fn test_tighter_limits_give_smaller_rounds() {
    let params = ClusterParams {
        max_size: 3,
        max_distance_m: 300.0,
        ..Default::default()
    };
    let result = cluster_all(build_groups(line("75001", 1, 9, 48.86, 120.0)), &params);

    for cluster in &result["75001"] {
        assert!(cluster.len() <= 3);
        assert!(cluster.max_pairwise_distance() <= 300.0);
    }
}

#[test]
fn test_coordinates_survive_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("bureaux.json");
    std::fs::write(
        &input,
        r#"[{"cp":"75001","adresse":"x","geo_point_2d":{"lat":48.852607623040676,"lon":2.3317855961322786}}]"#,
    )
    .unwrap();

    let result = cluster_all(
        build_groups(load_records(&input).unwrap()),
        &ClusterParams::default(),
    );
    let output = dir.path().join("clusters.json");
    write_clusters_json(&output, &result).unwrap();

    let text = std::fs::read_to_string(&output).unwrap();
    assert!(text.contains("48.852607623040676"), "{}", text);
    assert!(text.contains("2.3317855961322786"), "{}", text);
}

#[test]
fn test_loosely_typed_export_is_clustered() {
    let records: Vec<RawRecord> = serde_json::from_value(json!([
        { "objectid": 1, "adresse": 5, "cp": 75001, "geo_point_2d": { "lat": 48.8600, "lon": 2.3400 } },
        { "objectid": 2, "adresse": "5", "cp": "75001", "geo_point_2d": { "lat": "48.8602", "lon": "2.3402" } },
        { "objectid": 3, "adresse": "6", "cp": 75001, "geo_point_2d": { "lat": "n/a", "lon": 2.3400 } },
    ]))
    .unwrap();

    let result = cluster_all(build_groups(records), &ClusterParams::default());
    assert_eq!(result.len(), 1);
    assert_eq!(ids(&result["75001"]), vec![json!(1), json!(2)]);

    let value = serde_json::to_value(&result).unwrap();
    assert_eq!(value["75001"][0][0]["cp"], json!(75001));
    assert_eq!(value["75001"][0][0]["adresse"], json!(5));
    assert_eq!(value["75001"][0][1]["cp"], json!("75001"));
}
