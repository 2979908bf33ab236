// Dashboard domain model - chart-ready data for an external renderer
use super::format::with_thousands;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarData {
    pub name: String,
    pub value: f64,
    pub label: String,
}

impl BarData {
    pub fn new(name: String, value: f64, label: String) -> Self {
        Self { name, value, label }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationMarker {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapCenter {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub title: String,
    pub battery_levels: Vec<BarData>,
    pub locations: Vec<LocationMarker>,
    /// `None` when no vehicle has reported a position.
    pub map_center: Option<MapCenter>,
    pub lifetime_energy: Vec<BarData>,
}

impl Dashboard {
    pub fn new(
        title: String,
        battery_levels: Vec<BarData>,
        locations: Vec<LocationMarker>,
        lifetime_energy: Vec<BarData>,
    ) -> Self {
        let map_center = Self::center_of(&locations);
        Self {
            title,
            battery_levels,
            locations,
            map_center,
            lifetime_energy,
        }
    }

    fn center_of(locations: &[LocationMarker]) -> Option<MapCenter> {
        if locations.is_empty() {
            return None;
        }
        let count = locations.len() as f64;
        Some(MapCenter {
            latitude: locations.iter().map(|l| l.latitude).sum::<f64>() / count,
            longitude: locations.iter().map(|l| l.longitude).sum::<f64>() / count,
        })
    }

    pub fn battery_bar(name: String, level: u8) -> BarData {
        BarData::new(name, f64::from(level), format!("{}%", level))
    }

    pub fn energy_bar(name: String, kwh: f64) -> BarData {
        BarData::new(name, kwh, format!("{} kWh", with_thousands(kwh, 0)))
    }
}
