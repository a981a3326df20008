use transducer_demo::{IN_TRANSIT, SAMPLE_VEHICLES, Year, load_inventory, transform};

#[test]
fn sample_inventory_transforms_end_to_end() {
    let vehicles = load_inventory(SAMPLE_VEHICLES).unwrap();
    assert_eq!(vehicles.len(), 10);

    let out = transform(vehicles);

    assert_eq!(out.len(), 8);
    assert!(out.iter().all(|v| v.location.as_deref() != Some("Showroom")));
    assert!(out.iter().all(|v| v.model == v.model.to_uppercase()));

    let years: Vec<_> = out.iter().map(|v| v.year.clone()).collect();
    assert_eq!(
        years,
        [1976, 1993, 1993, 2008, 2011, 2011, 2012, 2012]
            .map(Year::Number)
            .to_vec()
    );

    // Ties keep their input order.
    let ids: Vec<_> = out.iter().map(|v| v.id.as_str()).collect();
    assert_eq!(
        ids,
        vec![
            "856039f0ff26",
            "5bf8d072696d",
            "1151dfa0b2c0",
            "f5af63bffc6d",
            "2c8f2fe7df13",
            "adf638096542",
            "ae4a21f49de2",
            "a6e1b8be0189",
        ]
    );

    let cube = out.iter().find(|v| v.id == "adf638096542").unwrap();
    assert_eq!(cube.location.as_deref(), Some(IN_TRANSIT));
    assert_eq!(cube.make_model.as_deref(), Some("Nissan CUBE"));
}

#[test]
fn transformed_json_uses_camel_case_and_numeric_years() {
    let out = transform(load_inventory(SAMPLE_VEHICLES).unwrap());
    let json = serde_json::to_value(&out).unwrap();

    assert_eq!(json[0]["makeModel"], "Toyota CELICA");
    assert_eq!(json[0]["year"], 1976);
}
