use ndarray::{Array1, Array2, Array3};
use nc2json::prelude::*;
use netcdf::create;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

/// Writes a rectilinear `lat`/`lon` file with a 2-D `data` variable
fn write_simple_grid(path: &Path, lats: &[f32], lons: &[f32], data: Array2<f32>) {
    let mut file = create(path).expect("Failed to create NetCDF file");
    file.add_attribute("title", "Test Grid")
        .expect("Failed to add title");
    file.add_dimension("lat", lats.len())
        .expect("Failed to add dimension lat");
    file.add_dimension("lon", lons.len())
        .expect("Failed to add dimension lon");

    let mut lat_var = file
        .add_variable::<f32>("lat", &["lat"])
        .expect("Failed to add lat");
    lat_var
        .put(Array1::from(lats.to_vec()).view(), ..)
        .expect("Failed to write lat");

    let mut lon_var = file
        .add_variable::<f32>("lon", &["lon"])
        .expect("Failed to add lon");
    lon_var
        .put(Array1::from(lons.to_vec()).view(), ..)
        .expect("Failed to write lon");

    let mut data_var = file
        .add_variable::<f32>("data", &["lat", "lon"])
        .expect("Failed to add data");
    data_var.put(data.view(), ..).expect("Failed to write data");
}

fn read_document(path: &Path) -> Value {
    let text = fs::read_to_string(path).expect("Failed to read JSON output");
    let json: Value = serde_json::from_str(&text).expect("Output is not valid JSON");
    let docs = json.as_array().expect("Top level must be an array");
    assert_eq!(docs.len(), 1);
    docs[0].clone()
}

fn points(doc: &Value) -> &Vec<Value> {
    doc["data_points"].as_array().expect("data_points must be an array")
}

#[test]
fn test_example_grid_all_and_filtered() -> Result<()> {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let data = Array2::from_shape_vec((2, 2), vec![1.0f32, f32::NAN, 3.0, 4.0])?;
    write_simple_grid(
        &temp_dir.path().join("example.nc"),
        &[10.0, 20.0],
        &[100.0, 110.0],
        data,
    );

    let summary = run_batch(&ConverterConfig::new(temp_dir.path()))?;
    assert_eq!(summary.files_found, 1);
    assert_eq!(summary.converted, 1);
    assert!(summary.failed.is_empty());
    assert_eq!(summary.total_points, 4);
    assert_eq!(summary.retained_points, 3);

    let all = read_document(&temp_dir.path().join("example_all.json"));
    let all_points = points(&all);
    assert_eq!(all_points.len(), 4);

    // Row-major: latitude outer, longitude inner
    assert_eq!(all_points[0]["latitude"], 10.0);
    assert_eq!(all_points[0]["longitude"], 100.0);
    assert_eq!(all_points[0]["value"], 1.0);
    assert_eq!(all_points[1]["latitude"], 10.0);
    assert_eq!(all_points[1]["longitude"], 110.0);
    assert!(all_points[1]["value"].is_null());
    assert_eq!(all_points[2]["latitude"], 20.0);
    assert_eq!(all_points[2]["longitude"], 100.0);
    assert_eq!(all_points[2]["value"], 3.0);
    assert_eq!(all_points[3]["value"], 4.0);

    let filtered = read_document(&temp_dir.path().join("example_filtered.json"));
    let filtered_points = points(&filtered);
    assert_eq!(filtered_points.len(), 3);
    assert!(filtered_points.iter().all(|p| !p["value"].is_null()));
    let values: Vec<f64> = filtered_points
        .iter()
        .map(|p| p["value"].as_f64().unwrap())
        .collect();
    assert_eq!(values, vec![1.0, 3.0, 4.0]);

    // Both variants share everything but the points
    for doc in [&all, &filtered] {
        assert_eq!(doc["file_info"]["filename"], "example.nc");
        assert_eq!(
            doc["file_info"]["variables"],
            serde_json::json!(["lat", "lon", "data"])
        );
        assert_eq!(doc["file_info"]["dimensions"]["lat"], 2);
        assert_eq!(doc["file_info"]["dimensions"]["lon"], 2);
        assert_eq!(doc["file_info"]["global_attributes"]["title"], "Test Grid");

        let cs = &doc["coordinate_system"];
        assert_eq!(cs["latitude_variable"], "lat");
        assert_eq!(cs["longitude_variable"], "lon");
        assert_eq!(cs["latitude_range"], serde_json::json!([10.0, 20.0]));
        assert_eq!(cs["longitude_range"], serde_json::json!([100.0, 110.0]));

        let dv = &doc["data_variable"];
        assert_eq!(dv["name"], "data");
        assert_eq!(dv["units"], "unknown");
        assert_eq!(dv["long_name"], "data");
    }

    Ok(())
}

#[test]
fn test_grid_point_count_is_product_of_coordinate_sizes() -> Result<()> {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let lats: Vec<f32> = (0..3).map(|i| -30.0 + i as f32 * 30.0).collect();
    let lons: Vec<f32> = (0..5).map(|i| i as f32 * 10.0).collect();
    let data = Array2::from_shape_vec((3, 5), (0..15).map(|i| i as f32).collect())?;
    write_simple_grid(&temp_dir.path().join("grid.nc"), &lats, &lons, data);

    let converted = convert_file(
        &temp_dir.path().join("grid.nc"),
        &ConverterConfig::new(temp_dir.path()),
    )?;

    assert_eq!(converted.file_info.dimension_len("lat"), Some(3));
    assert_eq!(converted.file_info.dimension_len("lon"), Some(5));
    assert_eq!(converted.all_points.len(), 15);
    assert_eq!(converted.filtered_points.len(), converted.all_points.len());
    assert_eq!(converted.stats().missing, 0);
    assert_eq!(converted.coordinate_system.latitude_range, [-30.0, 30.0]);
    assert_eq!(converted.coordinate_system.longitude_range, [0.0, 40.0]);

    // lat index 1, lon index 3 -> 1 * 5 + 3
    let point = converted.all_points[8];
    assert_eq!(point.latitude, 0.0);
    assert_eq!(point.longitude, 30.0);
    assert_eq!(point.value, Some(8.0));

    Ok(())
}

#[test]
fn test_unknown_coordinates_skip_file_but_batch_continues() -> Result<()> {
    let temp_dir = tempdir().expect("Failed to create temp dir");

    {
        let mut file = create(temp_dir.path().join("a_unknown.nc"))?;
        file.add_dimension("row", 2)?;
        file.add_dimension("col", 2)?;
        let mut northing = file.add_variable::<f32>("northing", &["row"])?;
        northing.put(Array1::from(vec![1.0f32, 2.0]).view(), ..)?;
        let mut easting = file.add_variable::<f32>("easting", &["col"])?;
        easting.put(Array1::from(vec![1.0f32, 2.0]).view(), ..)?;
        let mut val = file.add_variable::<f32>("val", &["row", "col"])?;
        val.put(Array2::from_shape_vec((2, 2), vec![1.0f32; 4])?.view(), ..)?;
    }

    let data = Array2::from_shape_vec((1, 2), vec![5.0f32, 6.0])?;
    write_simple_grid(&temp_dir.path().join("b_valid.nc"), &[45.0], &[7.0, 8.0], data);

    let summary = run_batch(&ConverterConfig::new(temp_dir.path()))?;
    assert_eq!(summary.files_found, 2);
    assert_eq!(summary.converted, 1);
    assert_eq!(summary.failed.len(), 1);
    assert_eq!(summary.failed[0].filename, "a_unknown.nc");
    assert!(summary.failed[0].reason.contains("latitude"));

    assert!(!temp_dir.path().join("a_unknown_all.json").exists());
    assert!(!temp_dir.path().join("a_unknown_filtered.json").exists());
    assert!(temp_dir.path().join("b_valid_all.json").exists());
    assert!(temp_dir.path().join("b_valid_filtered.json").exists());

    Ok(())
}

#[test]
fn test_corrupt_file_is_reported_and_skipped() -> Result<()> {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    fs::write(temp_dir.path().join("broken.nc"), b"this is not netcdf")?;
    let data = Array2::from_shape_vec((1, 1), vec![1.0f32])?;
    write_simple_grid(&temp_dir.path().join("good.nc"), &[1.0], &[2.0], data);

    let summary = run_batch(&ConverterConfig::new(temp_dir.path()))?;
    assert_eq!(summary.converted, 1);
    assert_eq!(summary.failed.len(), 1);
    assert_eq!(summary.failed[0].filename, "broken.nc");
    assert!(!temp_dir.path().join("broken_all.json").exists());

    let result = convert_file(
        &temp_dir.path().join("broken.nc"),
        &ConverterConfig::new(temp_dir.path()),
    );
    match result {
        Err(Nc2JsonError::FileOpen { path, .. }) => {
            assert!(path.ends_with("broken.nc"));
        }
        _ => panic!("Expected FileOpen error"),
    }

    Ok(())
}

#[test]
fn test_empty_directory_is_a_no_op() -> Result<()> {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    fs::write(temp_dir.path().join("notes.txt"), "not a grid")?;

    let summary = run_batch(&ConverterConfig::new(temp_dir.path()))?;
    assert_eq!(summary.files_found, 0);
    assert_eq!(summary.converted, 0);
    assert!(summary.failed.is_empty());

    Ok(())
}

#[test]
fn test_missing_directory_is_fatal() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let result = run_batch(&ConverterConfig::new(temp_dir.path().join("does_not_exist")));
    assert!(matches!(result, Err(Nc2JsonError::Io(_))));
}

#[test]
fn test_fill_missing_value_and_packing() -> Result<()> {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let file_path = temp_dir.path().join("packed.nc");

    {
        let mut file = create(&file_path)?;
        file.add_dimension("latitude", 2)?;
        file.add_dimension("longitude", 3)?;

        let mut lat = file.add_variable::<f64>("latitude", &["latitude"])?;
        lat.put(Array1::from(vec![50.0f64, 60.0]).view(), ..)?;
        let mut lon = file.add_variable::<f64>("longitude", &["longitude"])?;
        lon.put(Array1::from(vec![0.0f64, 1.0, 2.0]).view(), ..)?;

        let mut sst = file.add_variable::<i16>("sst", &["latitude", "longitude"])?;
        sst.put_attribute("_FillValue", -32767i16)?;
        sst.put_attribute("missing_value", -32766i16)?;
        sst.put_attribute("scale_factor", 0.5f32)?;
        sst.put_attribute("add_offset", 10.0f32)?;
        sst.put_attribute("units", "degC")?;
        sst.put_attribute("long_name", "sea surface temperature")?;
        let raw = Array2::from_shape_vec((2, 3), vec![0i16, -32767, 4, -32766, 8, 2])?;
        sst.put(raw.view(), ..)?;
    }

    let converted = convert_file(&file_path, &ConverterConfig::new(temp_dir.path()))?;

    let values: Vec<Option<f64>> = converted.all_points.iter().map(|p| p.value).collect();
    assert_eq!(
        values,
        vec![Some(10.0), None, Some(12.0), None, Some(14.0), Some(11.0)]
    );
    assert_eq!(converted.filtered_points.len(), 4);
    assert_eq!(converted.data_variable.name, "sst");
    assert_eq!(converted.data_variable.units, "degC");
    assert_eq!(converted.data_variable.long_name, "sea surface temperature");
    assert_eq!(converted.coordinate_system.latitude_variable, "latitude");
    assert_eq!(converted.coordinate_system.longitude_variable, "longitude");

    let stats = converted.stats();
    assert_eq!(stats.total, 6);
    assert_eq!(stats.missing, 2);
    assert_eq!(stats.retained, 4);

    Ok(())
}

#[test]
fn test_lon_lat_ordered_data_is_transposed() -> Result<()> {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let file_path = temp_dir.path().join("transposed.nc");

    {
        let mut file = create(&file_path)?;
        file.add_dimension("lat", 2)?;
        file.add_dimension("lon", 3)?;

        let mut lat = file.add_variable::<f32>("lat", &["lat"])?;
        lat.put(Array1::from(vec![1.0f32, 2.0]).view(), ..)?;
        let mut lon = file.add_variable::<f32>("lon", &["lon"])?;
        lon.put(Array1::from(vec![10.0f32, 20.0, 30.0]).view(), ..)?;

        // value = lat * 100 + lon, stored as (lon, lat)
        let mut field = file.add_variable::<f32>("field", &["lon", "lat"])?;
        let stored = Array2::from_shape_vec(
            (3, 2),
            vec![110.0f32, 210.0, 120.0, 220.0, 130.0, 230.0],
        )?;
        field.put(stored.view(), ..)?;
    }

    let converted = convert_file(&file_path, &ConverterConfig::new(temp_dir.path()))?;
    assert_eq!(converted.all_points.len(), 6);
    for point in &converted.all_points {
        let expected = point.latitude * 100.0 + point.longitude;
        assert_eq!(point.value, Some(expected));
    }

    Ok(())
}

#[test]
fn test_leading_dimension_uses_configured_index() -> Result<()> {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let file_path = temp_dir.path().join("series.nc");

    {
        let mut file = create(&file_path)?;
        file.add_dimension("time", 2)?;
        file.add_dimension("lat", 2)?;
        file.add_dimension("lon", 2)?;

        let mut time = file.add_variable::<f64>("time", &["time"])?;
        time.put(Array1::from(vec![0.0f64, 1.0]).view(), ..)?;
        let mut lat = file.add_variable::<f32>("lat", &["lat"])?;
        lat.put(Array1::from(vec![0.0f32, 1.0]).view(), ..)?;
        let mut lon = file.add_variable::<f32>("lon", &["lon"])?;
        lon.put(Array1::from(vec![0.0f32, 1.0]).view(), ..)?;

        let mut temp = file.add_variable::<f32>("temperature", &["time", "lat", "lon"])?;
        let data = Array3::from_shape_vec(
            (2, 2, 2),
            vec![1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0],
        )?;
        temp.put(data.view(), ..)?;
    }

    let first = convert_file(&file_path, &ConverterConfig::new(temp_dir.path()))?;
    // `time(time)` is a dimension coordinate, so `temperature` is chosen
    assert_eq!(first.data_variable.name, "temperature");
    let values: Vec<Option<f64>> = first.all_points.iter().map(|p| p.value).collect();
    assert_eq!(values, vec![Some(1.0), Some(2.0), Some(3.0), Some(4.0)]);

    let second = convert_file(
        &file_path,
        &ConverterConfig::new(temp_dir.path()).with_leading_index(1),
    )?;
    let values: Vec<Option<f64>> = second.all_points.iter().map(|p| p.value).collect();
    assert_eq!(values, vec![Some(5.0), Some(6.0), Some(7.0), Some(8.0)]);

    let out_of_range = convert_file(
        &file_path,
        &ConverterConfig::new(temp_dir.path()).with_leading_index(2),
    );
    assert!(matches!(out_of_range, Err(Nc2JsonError::InvalidData { .. })));

    Ok(())
}

#[test]
fn test_curvilinear_grid() -> Result<()> {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let file_path = temp_dir.path().join("swath.nc");

    {
        let mut file = create(&file_path)?;
        file.add_dimension("row", 2)?;
        file.add_dimension("col", 2)?;

        let mut lat = file.add_variable::<f32>("LAT", &["row", "col"])?;
        lat.put(
            Array2::from_shape_vec((2, 2), vec![1.0f32, 1.5, 2.0, 2.5])?.view(),
            ..,
        )?;
        let mut lon = file.add_variable::<f32>("LON", &["row", "col"])?;
        lon.put(
            Array2::from_shape_vec((2, 2), vec![30.0f32, 31.0, 32.0, 33.0])?.view(),
            ..,
        )?;
        let mut rad = file.add_variable::<f32>("radiance", &["row", "col"])?;
        rad.put(
            Array2::from_shape_vec((2, 2), vec![0.1f32, f32::NAN, 0.3, 0.4])?.view(),
            ..,
        )?;
    }

    let converted = convert_file(&file_path, &ConverterConfig::new(temp_dir.path()))?;
    assert_eq!(converted.all_points.len(), 4);
    assert_eq!(converted.filtered_points.len(), 3);
    assert_eq!(converted.all_points[3].latitude, 2.5);
    assert_eq!(converted.all_points[3].longitude, 33.0);
    assert!(converted.all_points[1].value.is_none());
    assert_eq!(converted.coordinate_system.latitude_range, [1.0, 2.5]);
    assert_eq!(converted.coordinate_system.longitude_range, [30.0, 33.0]);

    Ok(())
}

#[test]
fn test_paired_station_coordinates() -> Result<()> {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let file_path = temp_dir.path().join("stations.nc");

    {
        let mut file = create(&file_path)?;
        file.add_dimension("station", 3)?;

        let mut lat = file.add_variable::<f64>("latitude", &["station"])?;
        lat.put(Array1::from(vec![51.5f64, 48.9, 52.5]).view(), ..)?;
        let mut lon = file.add_variable::<f64>("longitude", &["station"])?;
        lon.put(Array1::from(vec![-0.1f64, 2.35, 13.4]).view(), ..)?;
        let mut obs = file.add_variable::<f64>("rainfall", &["station"])?;
        obs.put_attribute("units", "mm")?;
        obs.put(Array1::from(vec![1.2f64, 0.0, 3.4]).view(), ..)?;
    }

    let converted = convert_file(&file_path, &ConverterConfig::new(temp_dir.path()))?;
    assert_eq!(converted.all_points.len(), 3);
    assert_eq!(converted.all_points[2].latitude, 52.5);
    assert_eq!(converted.all_points[2].longitude, 13.4);
    assert_eq!(converted.all_points[2].value, Some(3.4));
    assert_eq!(converted.data_variable.units, "mm");

    Ok(())
}

#[test]
fn test_explicit_variable_selection() -> Result<()> {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let file_path = temp_dir.path().join("two_fields.nc");

    {
        let mut file = create(&file_path)?;
        file.add_dimension("lat", 1)?;
        file.add_dimension("lon", 2)?;

        let mut lat = file.add_variable::<f32>("lat", &["lat"])?;
        lat.put(Array1::from(vec![0.0f32]).view(), ..)?;
        let mut lon = file.add_variable::<f32>("lon", &["lon"])?;
        lon.put(Array1::from(vec![0.0f32, 1.0]).view(), ..)?;

        let mut first = file.add_variable::<f32>("u_wind", &["lat", "lon"])?;
        first.put(Array2::from_shape_vec((1, 2), vec![1.0f32, 2.0])?.view(), ..)?;
        let mut second = file.add_variable::<f32>("v_wind", &["lat", "lon"])?;
        second.put(Array2::from_shape_vec((1, 2), vec![3.0f32, 4.0])?.view(), ..)?;
    }

    let default = convert_file(&file_path, &ConverterConfig::new(temp_dir.path()))?;
    assert_eq!(default.data_variable.name, "u_wind");

    let explicit = convert_file(
        &file_path,
        &ConverterConfig::new(temp_dir.path()).with_variable("v_wind"),
    )?;
    assert_eq!(explicit.data_variable.name, "v_wind");
    assert_eq!(explicit.all_points[1].value, Some(4.0));

    let missing = convert_file(
        &file_path,
        &ConverterConfig::new(temp_dir.path()).with_variable("w_wind"),
    );
    assert!(matches!(
        missing,
        Err(Nc2JsonError::VariableResolution { .. })
    ));

    Ok(())
}

#[test]
fn test_output_directory_and_subdirectories() -> Result<()> {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let out_dir = temp_dir.path().join("json").join("nested");
    let nested_input = temp_dir.path().join("archive");
    fs::create_dir(&nested_input)?;

    let data = Array2::from_shape_vec((1, 1), vec![7.0f32])?;
    write_simple_grid(&temp_dir.path().join("top.nc"), &[1.0], &[1.0], data.clone());
    write_simple_grid(&nested_input.join("deep.nc"), &[1.0], &[1.0], data);

    let config = ConverterConfig::new(temp_dir.path()).with_output_dir(&out_dir);
    let summary = run_batch(&config)?;

    assert_eq!(summary.files_found, 1);
    assert!(out_dir.join("top_all.json").exists());
    assert!(out_dir.join("top_filtered.json").exists());
    assert!(!temp_dir.path().join("top_all.json").exists());
    assert!(!out_dir.join("deep_all.json").exists());

    Ok(())
}

#[test]
fn test_double_missing_value_on_float_variable() -> Result<()> {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let file_path = temp_dir.path().join("mixed_types.nc");

    {
        let mut file = create(&file_path)?;
        file.add_dimension("lat", 1)?;
        file.add_dimension("lon", 3)?;

        let mut lat = file.add_variable::<f32>("lat", &["lat"])?;
        lat.put(Array1::from(vec![5.0f32]).view(), ..)?;
        let mut lon = file.add_variable::<f32>("lon", &["lon"])?;
        lon.put(Array1::from(vec![0.0f32, 1.0, 2.0]).view(), ..)?;

        let mut precip = file.add_variable::<f32>("precip", &["lat", "lon"])?;
        precip.put_attribute("missing_value", 1.0e20f64)?;
        let raw = Array2::from_shape_vec((1, 3), vec![0.5f32, 1.0e20, 2.5])?;
        precip.put(raw.view(), ..)?;
    }

    let converted = convert_file(&file_path, &ConverterConfig::new(temp_dir.path()))?;

    let values: Vec<Option<f64>> = converted.all_points.iter().map(|p| p.value).collect();
    assert_eq!(values, vec![Some(0.5), None, Some(2.5)]);
    assert_eq!(converted.filtered_points.len(), 2);

    Ok(())
}

#[test]
fn test_packed_coordinates_are_unpacked_and_masked() -> Result<()> {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let file_path = temp_dir.path().join("packed_coords.nc");

    {
        let mut file = create(&file_path)?;
        file.add_dimension("lat", 3)?;
        file.add_dimension("lon", 2)?;

        let mut lat = file.add_variable::<i16>("lat", &["lat"])?;
        lat.put_attribute("scale_factor", 0.01f64)?;
        lat.put_attribute("_FillValue", -32767i16)?;
        lat.put(Array1::from(vec![4500i16, 4600, -32767]).view(), ..)?;

        let mut lon = file.add_variable::<i16>("lon", &["lon"])?;
        lon.put_attribute("scale_factor", 0.5f32)?;
        lon.put_attribute("add_offset", 100.0f32)?;
        lon.put(Array1::from(vec![0i16, 20]).view(), ..)?;

        let mut data = file.add_variable::<f32>("data", &["lat", "lon"])?;
        data.put(Array2::from_shape_vec((3, 2), vec![1.0f32; 6])?.view(), ..)?;
    }

    let converted = convert_file(&file_path, &ConverterConfig::new(temp_dir.path()))?;

    let [lat_min, lat_max] = converted.coordinate_system.latitude_range;
    assert!((lat_min - 45.0).abs() < 1e-6);
    assert!((lat_max - 46.0).abs() < 1e-6);
    assert_eq!(converted.coordinate_system.longitude_range, [100.0, 110.0]);

    let first = converted.all_points[0];
    assert!((first.latitude - 45.0).abs() < 1e-6);
    assert_eq!(first.longitude, 100.0);
    assert_eq!(converted.all_points[1].longitude, 110.0);
    // The masked latitude row stays in the grid without a coordinate
    assert!(converted.all_points[4].latitude.is_nan());

    Ok(())
}

#[test]
fn test_failed_write_leaves_no_partial_outputs() -> Result<()> {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let data = Array2::from_shape_vec((1, 2), vec![1.0f32, 2.0])?;
    write_simple_grid(&temp_dir.path().join("blocked.nc"), &[0.0], &[0.0, 1.0], data);

    // A directory in the way makes the `_filtered` write fail
    fs::create_dir(temp_dir.path().join("blocked_filtered.json"))?;

    let summary = run_batch(&ConverterConfig::new(temp_dir.path()))?;
    assert_eq!(summary.converted, 0);
    assert_eq!(summary.failed.len(), 1);
    assert_eq!(summary.failed[0].filename, "blocked.nc");
    assert!(!temp_dir.path().join("blocked_all.json").exists());

    Ok(())
}
