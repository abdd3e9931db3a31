/// π.
pub const PI: f64 = std::f64::consts::PI;

/// Speed of light in vacuum, m/s (exact, SI).
pub const C_MS: f64 = 299_792_458.0;

/// Scale from s/m² to ps/(nm·km): 1e12 · 1e-9 · 1e3.
pub const S_M2_TO_PS_NM_KM: f64 = 1e6;
