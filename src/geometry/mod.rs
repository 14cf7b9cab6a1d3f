use num_traits::Float;


/// Mean Earth radius in kilometers
pub const EARTH_RADIUS_KM: f64 = 6371.0;


/// Great-circle distance between two (latitude, longitude) pairs given in degrees
/// Haversine formula, result in the unit of `radius`
/// https://en.wikipedia.org/wiki/Haversine_formula
pub fn haversine<T>(lat1: T, lon1: T, lat2: T, lon2: T, radius: T) -> T
where
    T: Float,
    {
    let two = T::one() + T::one();

    let (lat1, lon1) = (lat1.to_radians(), lon1.to_radians());
    let (lat2, lon2) = (lat2.to_radians(), lon2.to_radians());

    let d_lat = lat2 - lat1;
    let d_lon = lon2 - lon1;

    let a = (d_lat / two).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / two).sin().powi(2);
    // rounding can push `a` a hair above 1 for antipodal points
    let c = two * a.sqrt().min(T::one()).asin();

    radius * c
}


/// Point on the globe, degrees
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LatLng {
    pub latitude: f64,
    pub longitude: f64,
}

impl LatLng {

    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Great-circle distance to another point in kilometers
    pub fn distance_km(&self, other: &LatLng) -> f64 {
        haversine(self.latitude, self.longitude, other.latitude, other.longitude, EARTH_RADIUS_KM)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol
    }

    #[test]
    fn test_same_point_is_zero() {
        let p = LatLng::new(23.7280, 90.3979);
        assert_eq!(p.distance_km(&p), 0.0);
    }

    #[test]
    fn test_symmetric() {
        let a = LatLng::new(23.7280, 90.3979);
        let b = LatLng::new(23.8433, 90.3978);
        assert_eq!(a.distance_km(&b), b.distance_km(&a));
    }

    #[test]
    fn test_one_degree_of_latitude() {
        // one degree along a meridian is radius * pi / 180
        let d = LatLng::new(0.0, 0.0).distance_km(&LatLng::new(1.0, 0.0));
        assert!(approx(d, EARTH_RADIUS_KM * std::f64::consts::PI / 180.0, 1e-9));
    }

    #[test]
    fn test_known_city_distance() {
        // London -> Paris is roughly 343.5 km
        let london = LatLng::new(51.5074, -0.1278);
        let paris = LatLng::new(48.8566, 2.3522);
        assert!(approx(london.distance_km(&paris), 343.5, 1.0));
    }

    #[test]
    fn test_antipodal_points() {
        let d = haversine(0.0_f64, 0.0, 0.0, 180.0, EARTH_RADIUS_KM);
        assert!(approx(d, EARTH_RADIUS_KM * std::f64::consts::PI, 1e-6));
    }

    #[test]
    fn test_generic_over_f32() {
        let d = haversine(0.0_f32, 0.0, 0.0, 1.0, 6371.0);
        assert!((d - 111.19).abs() < 0.01);
    }
}
