//! Renders a few frames of a spinning, textured cube to PNG files, stepping through every render mode.
//!
//! Usage: `cargo run --example spinning_cube [settings.ron] [output dir]`

use hybrid_raster::*;
use std::{env, fs, path::PathBuf};
use vek::*;

const FRAMES_PER_MODE: usize = 8;

/// Unit cube with one quad per face. Each face is `(normal, tangent, bitangent)` with `tangent × bitangent = normal`,
/// so its corners wind counter-clockwise seen from outside.
fn cube(material: MaterialId) -> Result<Mesh> {
    let faces = [
        (Vec3::unit_x(), -Vec3::unit_z(), Vec3::unit_y()),
        (-Vec3::unit_x(), Vec3::unit_z(), Vec3::unit_y()),
        (Vec3::unit_y(), Vec3::unit_x(), -Vec3::unit_z()),
        (-Vec3::unit_y(), Vec3::unit_x(), Vec3::unit_z()),
        (Vec3::unit_z(), Vec3::unit_x(), Vec3::unit_y()),
        (-Vec3::unit_z(), -Vec3::unit_x(), Vec3::unit_y()),
    ];

    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);
    for &(normal, tangent, bitangent) in &faces {
        let base = vertices.len() as u32;
        for &(s, t) in &[(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            let position = normal + tangent * s + bitangent * t;
            let uv = Vec2::new((s + 1.0) * 0.5, (1.0 - t) * 0.5);
            vertices.push(VertexInput::new(position, uv, normal).with_tangent(tangent));
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    Mesh::new(vertices, indices, material)
}

fn checkerboard(size: usize, a: Rgb<f32>, b: Rgb<f32>) -> Buffer2d<Rgb<f32>> {
    Buffer2d::fill_with([size, size], |[x, y]| if (x / 8 + y / 8) % 2 == 0 { a } else { b })
}

fn main() -> Result<()> {
    let mut args = env::args().skip(1);
    let settings = match args.next() {
        Some(path) => RenderSettings::load(path)?,
        None => RenderSettings {
            width: 320,
            height: 240,
            ..RenderSettings::default()
        },
    };
    let out_dir = args.next().map(PathBuf::from).unwrap_or_else(|| PathBuf::from("demos/out"));
    fs::create_dir_all(&out_dir)?;

    let mut materials = MaterialLibrary::new();
    materials.set_filter(settings.filter);
    let crate_material = materials.add(
        MappedMaterial::new(checkerboard(64, Rgb::new(0.8, 0.5, 0.2), Rgb::new(0.3, 0.15, 0.05)), 32.0)
            .with_specular(Buffer2d::fill([1, 1], Rgb::broadcast(0.5)), Buffer2d::fill([1, 1], Rgb::broadcast(1.0))),
    );
    let floor_material = materials.add(SolidColor::new(Rgb::new(0.2, 0.4, 0.2)));

    let mut scene = SceneGraph::from_settings(Vec3::new(0.0, 1.0, 6.0), settings);
    let main_scene = scene.add_scene();
    scene.add_mesh(cube(crate_material)?, main_scene)?;
    let floor = cube(floor_material)?.with_origin(Vec3::new(0.0, -3.0, -4.0));
    scene.add_mesh(floor, main_scene)?;

    let mut renderer = Renderer::new(scene.camera().size());
    let pixel_format = scene.settings().pixel_format;

    let mut frame = 0;
    for _ in 0..4 {
        for _ in 0..FRAMES_PER_MODE {
            scene.update(1.0 / 10.0);
            let stats = renderer.render(&mut scene, &materials);
            let path = out_dir.join(format!("frame_{:03}.png", frame));
            renderer.save_image(&path, pixel_format)?;
            println!(
                "{:?} frame {} -> {} ({} pixels)",
                scene.settings().render_mode,
                frame,
                path.display(),
                stats.pixels_written,
            );
            frame += 1;
        }
        scene.cycle_render_mode();
    }

    Ok(())
}
