use bevy::asset::{LoadState, RenderAssetUsages};
use bevy::mesh::{Indices, PrimitiveTopology};
use bevy::prelude::*;
use std::collections::HashMap;

use crate::config::{CONFIG_FILE, GlobeConfig};
use crate::core::point_to_geo;
use crate::globe::GlobeSpin;

/// Marker for the textured globe entity.
#[derive(Component)]
pub struct Earth;

/// The globe's base colour texture, watched until it finishes loading.
#[derive(Resource)]
pub struct EarthTexture {
    pub path: String,
    pub handle: Handle<Image>,
    pub settled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextureStatus {
    Pending,
    Loaded,
    Failed(String),
}

impl TextureStatus {
    pub fn from_load_state(state: &LoadState) -> Self {
        match state {
            LoadState::Loaded => TextureStatus::Loaded,
            LoadState::Failed(err) => TextureStatus::Failed(err.to_string()),
            _ => TextureStatus::Pending,
        }
    }
}

pub fn missing_texture_message(path: &str, reason: &str) -> String {
    format!(
        "Earth texture '{path}' failed to load ({reason}); the globe renders untextured. \
         Put an equirectangular image at assets/{path} or set \"texture\" in {CONFIG_FILE}"
    )
}

/// Spawn the textured globe at the origin.
pub fn spawn_earth(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    asset_server: Res<AssetServer>,
    config: Res<GlobeConfig>,
) {
    let mesh_handle = meshes.add(generate_icosphere(5, config.globe_radius));
    let texture: Handle<Image> = asset_server.load(config.texture.clone());

    let material_handle = materials.add(StandardMaterial {
        base_color: Color::WHITE,
        base_color_texture: Some(texture.clone()),
        perceptual_roughness: 1.0,
        ..default()
    });

    commands.spawn((
        Mesh3d(mesh_handle),
        MeshMaterial3d(material_handle),
        Transform::default(),
        Visibility::Visible,
        Name::new("Earth"),
        Earth,
    ));

    commands.insert_resource(EarthTexture {
        path: config.texture.clone(),
        handle: texture,
        settled: false,
    });
}

/// Log once whether the Earth texture loaded.
pub fn report_texture_load(asset_server: Res<AssetServer>, mut texture: ResMut<EarthTexture>) {
    if texture.settled {
        return;
    }
    let state = asset_server
        .get_load_state(texture.handle.id())
        .unwrap_or(LoadState::NotLoaded);
    match TextureStatus::from_load_state(&state) {
        TextureStatus::Pending => return,
        TextureStatus::Loaded => info!("Loaded Earth texture {}", texture.path),
        TextureStatus::Failed(reason) => warn!("{}", missing_texture_message(&texture.path, &reason)),
    }
    texture.settled = true;
}

pub fn apply_globe_spin(spin: Res<GlobeSpin>, mut earth: Query<&mut Transform, With<Earth>>) {
    if !spin.is_changed() {
        return;
    }
    for mut transform in earth.iter_mut() {
        transform.rotation = spin.rotation();
    }
}

/// Raw icosphere buffers, before they are packed into a [`Mesh`].
#[derive(Debug, Clone, Default)]
pub struct SphereGeometry {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub uvs: Vec<[f32; 2]>,
    pub indices: Vec<u32>,
}

/// Icosphere mesh with equirectangular UVs.
/// Each subdivision level quadruples the triangle count.
pub fn generate_icosphere(subdivisions: u32, radius: f32) -> Mesh {
    let geometry = icosphere_geometry(subdivisions, radius);

    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::default(),
    );
    mesh.insert_indices(Indices::U32(geometry.indices));
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, geometry.positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, geometry.normals);
    mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, geometry.uvs);
    mesh
}

pub fn icosphere_geometry(subdivisions: u32, radius: f32) -> SphereGeometry {
    let phi = (1.0 + 5.0_f32.sqrt()) / 2.0; // Golden ratio
    let mut vertices = vec![
        Vec3::new(-1.0, phi, 0.0).normalize(),
        Vec3::new(1.0, phi, 0.0).normalize(),
        Vec3::new(-1.0, -phi, 0.0).normalize(),
        Vec3::new(1.0, -phi, 0.0).normalize(),
        Vec3::new(0.0, -1.0, phi).normalize(),
        Vec3::new(0.0, 1.0, phi).normalize(),
        Vec3::new(0.0, -1.0, -phi).normalize(),
        Vec3::new(0.0, 1.0, -phi).normalize(),
        Vec3::new(phi, 0.0, -1.0).normalize(),
        Vec3::new(phi, 0.0, 1.0).normalize(),
        Vec3::new(-phi, 0.0, -1.0).normalize(),
        Vec3::new(-phi, 0.0, 1.0).normalize(),
    ];

    let mut indices: Vec<u32> = vec![
        0, 11, 5, 0, 5, 1, 0, 1, 7, 0, 7, 10, 0, 10, 11, 1, 5, 9, 5, 11, 4, 11, 10, 2, 10, 7, 6, 7,
        1, 8, 3, 9, 4, 3, 4, 2, 3, 2, 6, 3, 6, 8, 3, 8, 9, 4, 9, 5, 2, 4, 11, 6, 2, 10, 8, 6, 7, 9,
        8, 1,
    ];

    let mut midpoints: HashMap<(u32, u32), u32> = HashMap::new();
    for _ in 0..subdivisions {
        let mut next = Vec::with_capacity(indices.len() * 4);
        midpoints.clear();

        for tri in indices.chunks(3) {
            let (v1, v2, v3) = (tri[0], tri[1], tri[2]);
            let a = midpoint_vertex(&mut vertices, &mut midpoints, v1, v2);
            let b = midpoint_vertex(&mut vertices, &mut midpoints, v2, v3);
            let c = midpoint_vertex(&mut vertices, &mut midpoints, v3, v1);

            next.extend_from_slice(&[v1, a, c]);
            next.extend_from_slice(&[v2, b, a]);
            next.extend_from_slice(&[v3, c, b]);
            next.extend_from_slice(&[a, b, c]);
        }
        indices = next;
    }

    let mut geometry = SphereGeometry {
        positions: Vec::with_capacity(vertices.len()),
        normals: Vec::with_capacity(vertices.len()),
        uvs: Vec::with_capacity(vertices.len()),
        indices,
    };

    for vertex in vertices {
        let normal = vertex.normalize();
        geometry.positions.push(normal * radius);
        geometry.normals.push(normal);
        geometry.uvs.push(equirect_uv(normal));
    }

    fix_texture_seams(&mut geometry);
    geometry
}

/// `u = (lon + 180) / 360`, `v = (90 - lat) / 180`.
pub fn equirect_uv(direction: Vec3) -> [f32; 2] {
    match point_to_geo(direction.as_dvec3(), 0.0) {
        Ok(geo) => [
            ((geo.lon + 180.0) / 360.0) as f32,
            ((90.0 - geo.lat) / 180.0) as f32,
        ],
        // Only reachable for degenerate vertices
        Err(_) => [0.5, 0.5],
    }
}

fn midpoint_vertex(
    vertices: &mut Vec<Vec3>,
    cache: &mut HashMap<(u32, u32), u32>,
    v1: u32,
    v2: u32,
) -> u32 {
    let key = if v1 < v2 { (v1, v2) } else { (v2, v1) };
    if let Some(&index) = cache.get(&key) {
        return index;
    }

    let midpoint = ((vertices[v1 as usize] + vertices[v2 as usize]) / 2.0).normalize();
    vertices.push(midpoint);
    let index = vertices.len() as u32 - 1;
    cache.insert(key, index);
    index
}

/// Triangles that straddle the antimeridian get their low-u corners duplicated
/// with `u + 1` so the texture does not smear across the whole globe.
fn fix_texture_seams(geometry: &mut SphereGeometry) {
    let mut indices = Vec::with_capacity(geometry.indices.len());

    for tri in geometry.indices.chunks(3) {
        let us = [
            geometry.uvs[tri[0] as usize][0],
            geometry.uvs[tri[1] as usize][0],
            geometry.uvs[tri[2] as usize][0],
        ];
        let max_du = (us[0] - us[1])
            .abs()
            .max((us[0] - us[2]).abs())
            .max((us[1] - us[2]).abs());

        if max_du <= 0.5 {
            indices.extend_from_slice(tri);
            continue;
        }

        for (j, &idx) in tri.iter().enumerate() {
            let i = idx as usize;
            if us[j] < 0.25 {
                geometry.positions.push(geometry.positions[i]);
                geometry.normals.push(geometry.normals[i]);
                geometry.uvs.push([us[j] + 1.0, geometry.uvs[i][1]]);
                indices.push(geometry.positions.len() as u32 - 1);
            } else {
                indices.push(idx);
            }
        }
    }

    geometry.indices = indices;
}
