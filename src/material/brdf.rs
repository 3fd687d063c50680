use vek::{Rgb, Vec3};

/// Phong specular reflection.
///
/// `light_direction` points from the light towards the surface and `view_direction` from the camera towards the
/// surface. Returns black when the reflected light points away from the viewer.
#[inline]
pub fn phong(
    specular: Rgb<f32>,
    exponent: f32,
    light_direction: Vec3<f32>,
    view_direction: Vec3<f32>,
    normal: Vec3<f32>,
) -> Rgb<f32> {
    let reflect = -light_direction + normal * (2.0 * normal.dot(light_direction));
    let cos_angle = reflect.dot(view_direction);
    if cos_angle > 0.0 {
        specular * cos_angle.powf(exponent)
    } else {
        Rgb::zero()
    }
}
