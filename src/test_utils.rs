use crate::config::MapConfig;

// Check that the error between a and b is close enough
pub fn approx(a: f64, b: f64, eps: f64) -> bool {
    (a - b).abs() <= eps
}

pub fn make_config(patch: impl FnOnce(&mut MapConfig)) -> MapConfig {
    let mut cfg = MapConfig::default();
    patch(&mut cfg);
    cfg
}
