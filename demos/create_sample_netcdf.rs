//! Creates a sample NetCDF file for trying out nc2json.
//!
//! The file holds a 1-D lat/lon grid, a time axis, and a temperature field
//! with a few `_FillValue` cells so both output variants differ.

use ndarray::{Array1, Array3};
use netcdf::create;
use std::path::Path;

const FILL_VALUE: f32 = -999.0;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let output_path = Path::new("sample_grid.nc");

    println!("🔨 Creating sample NetCDF file: {}", output_path.display());

    // Remove existing file if it exists
    if output_path.exists() {
        std::fs::remove_file(output_path)?
    }

    let mut file = create(output_path)?;

    file.add_attribute("title", "Sample surface temperature")?;
    file.add_attribute("institution", "nc2json demo")?;
    file.add_attribute("Conventions", "CF-1.8")?;

    file.add_dimension("time", 2)?;
    file.add_dimension("lat", 5)?;
    file.add_dimension("lon", 8)?;

    {
        let mut time_var = file.add_variable::<f64>("time", &["time"])?;
        time_var.put_attribute("units", "days since 2024-01-01")?;
        time_var.put(Array1::from(vec![0.0f64, 1.0]).view(), ..)?;
    }

    {
        let mut lat_var = file.add_variable::<f32>("lat", &["lat"])?;
        lat_var.put_attribute("units", "degrees_north")?;
        lat_var.put_attribute("long_name", "latitude")?;

        let lat_data: Vec<f32> = (0..5).map(|i| -40.0 + i as f32 * 20.0).collect();
        lat_var.put(Array1::from(lat_data).view(), ..)?;
    }

    {
        let mut lon_var = file.add_variable::<f32>("lon", &["lon"])?;
        lon_var.put_attribute("units", "degrees_east")?;
        lon_var.put_attribute("long_name", "longitude")?;

        let lon_data: Vec<f32> = (0..8).map(|i| -180.0 + i as f32 * 45.0).collect();
        lon_var.put(Array1::from(lon_data).view(), ..)?;
    }

    {
        let mut temp_var = file.add_variable::<f32>("temperature", &["time", "lat", "lon"])?;
        temp_var.put_attribute("units", "K")?;
        temp_var.put_attribute("long_name", "air temperature")?;
        temp_var.put_attribute("_FillValue", FILL_VALUE)?;

        let mut temp_data = Vec::with_capacity(2 * 5 * 8);
        for time_idx in 0..2 {
            for lat_idx in 0..5 {
                for lon_idx in 0..8 {
                    // Land mask stand-in: a diagonal of missing cells
                    if lat_idx == lon_idx {
                        temp_data.push(FILL_VALUE);
                        continue;
                    }
                    let lat_effect = -20.0 * ((lat_idx as f32 - 2.0) / 2.0).abs();
                    temp_data.push(288.0 + lat_effect + time_idx as f32);
                }
            }
        }

        let temp_array = Array3::from_shape_vec((2, 5, 8), temp_data)?;
        temp_var.put(temp_array.view(), ..)?;
    }

    println!("✅ Successfully created sample NetCDF file with:");
    println!("   📏 Dimensions: time(2), lat(5), lon(8)");
    println!("   📈 Variables: time, lat, lon, temperature");
    println!("\n🧪 Convert it with:");
    println!("   cargo run -- --dir .");

    Ok(())
}
