// Copyright 2020 TwoCookingMice

use tartelette::core::binding::{AttributeBinding, BindingMode, PerFace, PerGeometry, PerVertex};
use tartelette::core::bvh::IndexBvh;
use tartelette::core::scene_params::{BvhPrimitives, SceneParams};
use tartelette::core::surface_config::{load_surface_config, SurfaceConfig};
use tartelette::core::texture::TextureSampler;
use tartelette::io::exr_utils::{read_exr_texture, write_exr_to_file};
use tartelette::math::constants::Vector3f;
use tartelette::math::spectrum::Spectrum;
use tartelette::renderers::probe::{ProbeImage, SurfaceProbe};
use tartelette::shapes::triangle::Triangle;
use tartelette::shapes::triangle_mesh::TriangleMesh;
use tartelette::textures::image::{load_rgba8, TextureFileKind};

use std::env;

type MeshParams<'a, X, NB = PerFace, CB = PerFace> =
    SceneParams<'a, BvhPrimitives<'a, Triangle>, u32, X, NB, CB>;

/// Normal and color arrays for every binding the configuration can ask for.
/// Colors are a visualization of the normals.
struct MeshArrays {
    vertex_normals: Vec<Vector3f>,
    face_normals: Vec<Vector3f>,
    geometry_normal: Vec<Vector3f>,
    vertex_colors: Vec<Spectrum>,
    face_colors: Vec<Spectrum>,
    geometry_color: Vec<Spectrum>,
}

impl MeshArrays {
    fn new(mesh: &TriangleMesh) -> Self {
        let face_normals = mesh.geometric_normals().to_vec();
        let vertex_normals = match mesh.shading_normals() {
            Some(normals) => normals.to_vec(),
            None => face_normals.iter().flat_map(|n| [*n; 3]).collect(),
        };
        let sum = face_normals.iter().fold(Vector3f::zeros(), |acc, n| acc + n);
        let geometry_normal = vec![sum.try_normalize(1e-8).unwrap_or_else(|| Vector3f::new(0.0, 0.0, 1.0))];

        Self {
            vertex_colors: vertex_normals.iter().map(normal_color).collect(),
            face_colors: face_normals.iter().map(normal_color).collect(),
            geometry_color: geometry_normal.iter().map(normal_color).collect(),
            vertex_normals,
            face_normals,
            geometry_normal,
        }
    }
}

fn normal_color(n: &Vector3f) -> Spectrum {
    Spectrum::rgb(n.x * 0.5 + 0.5, n.y * 0.5 + 0.5, n.z * 0.5 + 0.5)
}

fn bind_normals<'a, X: TextureSampler>(probe: &SurfaceProbe<'_, Triangle>,
                                       params: MeshParams<'a, X>,
                                       arrays: &'a MeshArrays,
                                       config: &SurfaceConfig) -> (ProbeImage, Vec<bool>) {
    match config.normal_binding {
        BindingMode::PerVertex => bind_colors(probe,
                                              params.with_shading_normals(&arrays.vertex_normals)
                                                    .with_normal_binding(PerVertex),
                                              arrays, config),
        BindingMode::PerFace => bind_colors(probe,
                                            params.with_geometric_normals(&arrays.face_normals)
                                                  .with_normal_binding(PerFace),
                                            arrays, config),
        BindingMode::PerGeometry => bind_colors(probe,
                                                params.with_geometric_normals(&arrays.geometry_normal)
                                                      .with_normal_binding(PerGeometry),
                                                arrays, config),
    }
}

fn bind_colors<'a, X, NB>(probe: &SurfaceProbe<'_, Triangle>,
                          params: MeshParams<'a, X, NB>,
                          arrays: &'a MeshArrays,
                          config: &SurfaceConfig) -> (ProbeImage, Vec<bool>)
where
    X: TextureSampler,
    NB: AttributeBinding,
{
    let lanes = config.lanes;
    match config.color_binding {
        BindingMode::PerVertex => render_lanes(probe,
                                               &params.with_colors(&arrays.vertex_colors)
                                                      .with_color_binding(PerVertex),
                                               lanes),
        BindingMode::PerFace => render_lanes(probe,
                                             &params.with_colors(&arrays.face_colors)
                                                    .with_color_binding(PerFace),
                                             lanes),
        BindingMode::PerGeometry => render_lanes(probe,
                                                 &params.with_colors(&arrays.geometry_color)
                                                        .with_color_binding(PerGeometry),
                                                 lanes),
    }
}

fn render_lanes<X, NB, CB>(probe: &SurfaceProbe<'_, Triangle>,
                           params: &MeshParams<'_, X, NB, CB>,
                           lanes: usize) -> (ProbeImage, Vec<bool>)
where
    X: TextureSampler,
    NB: AttributeBinding,
    CB: AttributeBinding,
{
    match lanes {
        4 => probe.render::<4, _, u32>(params),
        _ => probe.render::<8, _, u32>(params),
    }
}

fn run(config_path: &str, rows: usize, output_path: Option<&str>) -> Result<(), String> {
    let config = load_surface_config(config_path).map_err(|e| e.to_string())?;
    let mesh_path = config.mesh.to_string_lossy().to_string();
    let mesh = TriangleMesh::from_obj(&mesh_path, 0).map_err(|e| e.to_string())?;

    let arrays = MeshArrays::new(&mesh);
    let bvhs = vec![IndexBvh::new(mesh.triangles().to_vec())];
    let materials = vec![0u32];
    let probe = SurfaceProbe::new(&bvhs[0], rows);
    let params = SceneParams::new(BvhPrimitives::new(&bvhs), &materials);

    let (image, hit_mask) = match (&config.texture, mesh.tex_coords()) {
        (Some(texture), Some(tex_coords)) => {
            let texture_path = texture.filename.to_string_lossy().to_string();
            match TextureFileKind::from_path(&texture_path)? {
                TextureFileKind::Ldr => {
                    let textures = vec![load_rgba8(&texture_path)?
                        .with_filter_mode(texture.filter)
                        .with_address_modes(texture.address)];
                    bind_normals(&probe, params.with_textures(tex_coords, &textures), &arrays, &config)
                }
                TextureFileKind::Exr => {
                    let textures = vec![read_exr_texture(&texture_path)?
                        .with_filter_mode(texture.filter)
                        .with_address_modes(texture.address)];
                    bind_normals(&probe, params.with_textures(tex_coords, &textures), &arrays, &config)
                }
            }
        }
        (Some(texture), None) => {
            log::warn!("Mesh {} has no texture coordinates, ignoring texture {}.",
                       mesh_path, texture.filename.display());
            bind_normals(&probe, params, &arrays, &config)
        }
        (None, _) => bind_normals(&probe, params, &arrays, &config),
    };

    let mean = image.mean_hit_color(&hit_mask);
    log::info!("Probe {}x{}: {} hits, mean color ({:.4}, {:.4}, {:.4}, {:.4}).",
               image.width, image.height, image.hits, mean[0], mean[1], mean[2], mean[3]);

    if let Some(path) = output_path {
        write_exr_to_file(&image.pixels, image.width, image.height, path)?;
    }
    Ok(())
}

fn main() {
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <surface.xml> [--rows N] [--output image.exr]", args[0]);
        std::process::exit(1);
    }

    let config_path = &args[1];
    let mut rows: usize = 64;
    let mut output_path: Option<String> = None;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--rows" => {
                i += 1;
                rows = args.get(i).and_then(|v| v.parse::<usize>().ok()).unwrap_or(rows);
            }
            "--output" => {
                i += 1;
                output_path = args.get(i).cloned();
            }
            other => log::warn!("Ignoring unknown argument: {}.", other),
        }
        i += 1;
    }

    if let Err(err) = run(config_path, rows, output_path.as_deref()) {
        eprintln!("{}", err);
        std::process::exit(1);
    }
}
