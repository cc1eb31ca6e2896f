//! Integration tests for the NEO engine.

use neo_engine::types::{NeoFeed, SentryFeed, SentryRiskLevel};
use neo_engine::{
  classify, compute_impact_effects, parse_risk_feed, process_asteroids, Engine, ImpactParameters,
  RawAsteroid, Request, Response, RiskTier, TargetMaterial,
};

fn fixture_feed() -> NeoFeed {
  let json = r#"{
    "links": {"self": "http://api.nasa.gov/neo/rest/v1/feed?start_date=2025-01-14"},
    "element_count": 3,
    "near_earth_objects": {
      "2025-01-15": [
        {
          "id": "3542519",
          "neo_reference_id": "3542519",
          "name": "(2010 PK9)",
          "nasa_jpl_url": "https://ssd.jpl.nasa.gov/tools/sbdb_lookup.html#/?sstr=3542519",
          "absolute_magnitude_h": 21.95,
          "estimated_diameter": {
            "kilometers": {"estimated_diameter_min": 0.1108038821, "estimated_diameter_max": 0.2477650126},
            "meters": {"estimated_diameter_min": 110.8038821, "estimated_diameter_max": 247.7650126}
          },
          "is_potentially_hazardous_asteroid": true,
          "close_approach_data": [
            {
              "close_approach_date": "2025-01-15",
              "close_approach_date_full": "2025-Jan-15 14:02",
              "epoch_date_close_approach": 1736949720000,
              "relative_velocity": {"kilometers_per_second": "14.7984539742", "kilometers_per_hour": "53274.43"},
              "miss_distance": {"astronomical": "0.0019", "lunar": "0.7391", "kilometers": "284125.3", "miles": "176547.2"},
              "orbiting_body": "Earth"
            }
          ],
          "is_sentry_object": false
        }
      ],
      "2025-01-14": [
        {
          "id": "2465633",
          "name": "465633 (2009 JR5)",
          "nasa_jpl_url": "https://ssd.jpl.nasa.gov/tools/sbdb_lookup.html#/?sstr=2465633",
          "absolute_magnitude_h": 20.44,
          "estimated_diameter": {"kilometers": {"estimated_diameter_min": 0.2170475943, "estimated_diameter_max": 0.4853331752}},
          "is_potentially_hazardous_asteroid": false,
          "close_approach_data": [
            {
              "close_approach_date": "2025-01-14",
              "relative_velocity": {"kilometers_per_second": "18.1279360862"},
              "miss_distance": {"lunar": "117.8", "kilometers": "45290298.225725659"},
              "orbiting_body": "Earth"
            }
          ],
          "is_sentry_object": false
        },
        {
          "id": "54016476",
          "name": "(2020 GK1)",
          "nasa_jpl_url": "https://ssd.jpl.nasa.gov/tools/sbdb_lookup.html#/?sstr=54016476",
          "absolute_magnitude_h": 25.1,
          "estimated_diameter": {"kilometers": {"estimated_diameter_min": 0.02, "estimated_diameter_max": 0.05}},
          "is_potentially_hazardous_asteroid": false,
          "close_approach_data": [],
          "is_sentry_object": true
        }
      ]
    }
  }"#;
  serde_json::from_str(json).unwrap()
}

fn fixture_sentry() -> SentryFeed {
  let json = r#"{
    "signature": {"version": "2.0", "source": "NASA/JPL Sentry Data API"},
    "count": "4",
    "data": [
      {"des": "2000 SG344", "fullname": "(2000 SG344)", "ip": "0.002744", "ts_max": "0", "ps_max": "-2.77", "ps_cum": "-2.77", "n_imp": 300, "last_obs": "2000-10-03"},
      {"des": "29075", "fullname": "29075 (1950 DA)", "ip": "0.0003800", "ts_max": null, "ps_max": "-0.93", "ps_cum": "-0.93", "n_imp": 1, "last_obs": "2021-03-02"},
      {"des": "2023 DW", "ip": "-", "ts_max": "1", "n_imp": null},
      {"des": "101955", "fullname": "101955 Bennu (1999 RQ36)", "ip": "5.7e-4", "ts_max": "-", "ps_max": "-1.40", "n_imp": "157"}
    ]
  }"#;
  serde_json::from_str(json).unwrap()
}

#[test]
fn feed_batch_produces_sorted_canonical_records() {
  let engine = Engine::with_defaults();
  let report = engine.feed(&fixture_feed());

  // The Sentry object without approaches is dropped, the batch continues.
  assert_eq!(report.rejected.len(), 1);
  assert_eq!(report.rejected[0].record_id.as_deref(), Some("54016476"));
  assert_eq!(report.rejected[0].field.as_deref(), Some("close_approach_data"));

  let ids: Vec<_> = report.asteroids.iter().map(|a| a.id.as_str()).collect();
  assert_eq!(ids, vec!["2465633", "3542519"]);

  let far = &report.asteroids[0];
  assert_eq!(far.name, "465633 2009 JR5");
  assert_eq!(far.distance, "45.29M km");
  assert_eq!(far.size, "351m");
  assert_eq!(far.velocity, "18.1 km/s");
  assert_eq!(far.date_formatted, "Jan 14, 2025");
  assert_eq!(far.risk, RiskTier::Minimal);

  let near = &report.asteroids[1];
  assert_eq!(near.name, "2010 PK9");
  assert_eq!(near.distance, "284k km");
  assert_eq!(near.size, "179m");
  assert_eq!(near.risk, RiskTier::Moderate);

  assert_eq!(report.summary.total, 2);
  assert_eq!(report.summary.hazardous, 1);
  assert_eq!(report.summary.hazardous_percent, 50.0);
  assert_eq!(report.summary.high_risk, 0);
  assert_eq!(report.summary.closest.as_ref().unwrap().id, "3542519");
  assert_eq!(report.summary.largest.as_ref().unwrap().id, "2465633");
}

#[test]
fn process_asteroids_fails_whole_batch_on_malformed_record() {
  let feed = fixture_feed();
  let raws: Vec<RawAsteroid> = feed
    .near_earth_objects
    .values()
    .flatten()
    .map(|v| serde_json::from_value(v.clone()).unwrap())
    .collect();
  let err = process_asteroids(&raws).unwrap_err();
  assert!(err.to_string().contains("close_approach_data"), "{}", err);
}

#[test]
fn normalization_is_byte_for_byte_deterministic() {
  let engine = Engine::with_defaults();
  let a = serde_json::to_string(&engine.feed(&fixture_feed())).unwrap();
  let b = serde_json::to_string(&engine.feed(&fixture_feed())).unwrap();
  assert_eq!(a, b);
}

#[test]
fn canonical_record_json_shape() {
  let engine = Engine::with_defaults();
  let report = engine.feed(&fixture_feed());
  let v = serde_json::to_value(&report.asteroids[1]).unwrap();
  assert_eq!(v["risk"], "MODERATE");
  assert_eq!(v["date"], "2025-01-15");
  assert_eq!(v["is_potentially_hazardous"], true);
  assert!(v.get("approach_date").is_none());
}

#[test]
fn classifier_reference_points() {
  assert_eq!(classify(100_000.0, 2.0, true, true), RiskTier::Extreme);
  assert_eq!(classify(4_000_000.0, 5.0, false, false), RiskTier::Minimal);
  assert_eq!(classify(300_000.0, 1.5, true, false), RiskTier::Extreme);
  assert_eq!(classify(500_000.0, 0.6, true, false), RiskTier::Moderate);
}

#[test]
fn risk_feed_ranks_and_derives_fields() {
  let feed = fixture_sentry();
  let entries = parse_risk_feed(&feed.data, 5);
  let ids: Vec<_> = entries.iter().map(|e| e.designation.as_str()).collect();
  assert_eq!(ids, vec!["2000 SG344", "101955", "29075", "2023 DW"]);

  assert_eq!(entries[0].confidence, 95.0);
  assert_eq!(entries[0].risk_level, SentryRiskLevel::Minimal);
  assert_eq!(entries[2].confidence, 72.0);
  assert_eq!(entries[2].full_name, "29075 (1950 DA)");
  assert_eq!(entries[1].impact_count, 157.0);

  let dw = &entries[3];
  assert_eq!(dw.impact_probability, 0.0);
  assert_eq!(dw.confidence, 70.0);
  assert_eq!(dw.risk_level, SentryRiskLevel::Low);
  assert_eq!(dw.full_name, "2023 DW");
  assert_eq!(dw.last_observed, "TBD");
}

#[test]
fn golden_impact_scenario() {
  let params = ImpactParameters {
    diameter_km: 0.03,
    density_kg_m3: 2600.0,
    velocity_km_s: 42.0,
    angle_deg: 40.0,
    target_material: TargetMaterial::Sedimentary,
    latitude: 35.0,
    longitude: -95.0,
    observer_distance_km: 2050.0,
  };
  let e = compute_impact_effects(&params);

  let rel = |actual: f64, expected: f64| ((actual - expected) / expected).abs() < 1e-6;
  assert!(rel(e.energy_megatons, 7.748410905701365), "{}", e.energy_megatons);
  assert!(rel(e.seismic_magnitude, 5.192238894113319), "{}", e.seismic_magnitude);
  assert!(rel(e.thermal_radius_km, 7.748410905701365f64.powf(0.41) * 2.5));
  assert!(rel(e.blast_radius_km, 7.748410905701365f64.powf(0.33) * 3.2));
  assert!(rel(e.safe_distance_km, 7.748410905701365f64.powf(0.33) * 15.0));
  assert!(e.crater_diameter_km > 0.0);
}

#[test]
fn json_lines_protocol_round_trip() {
  let engine = Engine::with_defaults();
  let lines = [
    r#"{"kind":"risk_feed","feed":{"data":[{"des":"a","ip":"1e-5"},{"des":"b","ip":"2e-5"}]},"top_n":1}"#,
    r#"{"kind":"impact","params":{"diameter_km":0.05,"density_kg_m3":3000,"velocity_km_s":20,"angle_deg":45,"target_material":"water"}}"#,
    r#"{"kind":"approaches","reference_date":"2020-01-01","asteroid":{"close_approach_data":[{"close_approach_date":"2019-12-31","relative_velocity":{"kilometers_per_second":"5.0"},"miss_distance":{"kilometers":"400000","lunar":"1.04"},"orbiting_body":"Earth"}]}}"#,
  ];

  let outputs: Vec<serde_json::Value> = lines
    .iter()
    .map(|l| {
      let req: Request = serde_json::from_str(l).unwrap();
      serde_json::to_value(engine.process(&req).unwrap()).unwrap()
    })
    .collect();

  assert_eq!(outputs[0]["kind"], "risk_feed");
  assert_eq!(outputs[0]["entries"][0]["designation"], "b");
  assert_eq!(outputs[0]["entries"].as_array().unwrap().len(), 1);

  assert_eq!(outputs[1]["kind"], "impact");
  assert_eq!(outputs[1]["finite"], true);

  assert_eq!(outputs[2]["kind"], "approaches");
  assert_eq!(outputs[2]["history"]["past"][0]["distance"], "1.04 LD");
  assert!(outputs[2]["history"]["upcoming"].as_array().unwrap().is_empty());
}

#[test]
fn lookup_of_malformed_record_names_the_field() {
  let json = r#"{
    "id": "1", "name": "x", "nasa_jpl_url": "u", "absolute_magnitude_h": 1.0,
    "is_potentially_hazardous_asteroid": true, "is_sentry_object": false,
    "close_approach_data": [{"close_approach_date": "2025-01-01"}]
  }"#;
  let req = Request::Lookup {
    asteroid: serde_json::from_str(json).unwrap(),
  };
  let err = Engine::with_defaults().process(&req).unwrap_err();
  assert!(err.to_string().contains("estimated_diameter"), "{}", err);
}

#[test]
fn scenario_from_tracked_object_is_computable() {
  let engine = Engine::with_defaults();
  let report = engine.feed(&fixture_feed());
  let params = engine.scenario_for(&report.asteroids[1]);
  match engine.process(&Request::Impact { params }).unwrap() {
    Response::Impact { finite, effects } => {
      assert!(finite);
      assert!(effects.blast_radius_km > 0.0);
    }
    other => panic!("unexpected response {:?}", other),
  }
}
