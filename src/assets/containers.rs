//! Turning named glTF nodes into lab containers
//!
//! A node's primitives are collected with their transforms relative to the
//! node, its vertical extent is measured from the mesh positions, and the
//! primitives are re-parented under a fresh container pivot: centered for
//! the flask, hanging below the pivot for the tube.

use bevy::gltf::{GltfMesh, GltfNode};
use bevy::prelude::*;

use crate::core::{LabConfig, LabError};
use crate::lab::{Container, ContainerKind, FillLevel, Flask, Tube};

/// One mesh primitive of a container, relative to the container's node
#[derive(Debug, Clone)]
pub struct ContainerPart {
    pub mesh: Handle<Mesh>,
    pub transform: Transform,
}

/// Lowest and highest y of a set of points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerticalExtent {
    pub min: f32,
    pub max: f32,
}

impl VerticalExtent {
    pub fn of_points(points: impl IntoIterator<Item = Vec3>) -> Option<Self> {
        points.into_iter().fold(None, |extent, p| {
            Some(match extent {
                None => Self { min: p.y, max: p.y },
                Some(e) => Self {
                    min: e.min.min(p.y),
                    max: e.max.max(p.y),
                },
            })
        })
    }

    pub fn height(&self) -> f32 {
        self.max - self.min
    }

    pub fn center(&self) -> f32 {
        (self.min + self.max) / 2.0
    }
}

/// Walk a node and its descendants, collecting primitives
///
/// The root's own translation is dropped: the container is re-placed on the
/// floor, only its rotation and scale shape the geometry.
pub fn collect_parts(
    root: &Handle<GltfNode>,
    nodes: &Assets<GltfNode>,
    gltf_meshes: &Assets<GltfMesh>,
) -> Vec<ContainerPart> {
    let mut parts = Vec::new();
    if let Some(node) = nodes.get(root) {
        let base = Transform {
            translation: Vec3::ZERO,
            ..node.transform
        };
        collect_node(node, base, nodes, gltf_meshes, &mut parts);
    }
    parts
}

fn collect_node(
    node: &GltfNode,
    transform: Transform,
    nodes: &Assets<GltfNode>,
    gltf_meshes: &Assets<GltfMesh>,
    parts: &mut Vec<ContainerPart>,
) {
    if let Some(mesh) = node.mesh.as_ref().and_then(|h| gltf_meshes.get(h)) {
        parts.extend(mesh.primitives.iter().map(|primitive| ContainerPart {
            mesh: primitive.mesh.clone(),
            transform,
        }));
    }
    for child in node.children.iter().filter_map(|h| nodes.get(h)) {
        collect_node(child, transform * child.transform, nodes, gltf_meshes, parts);
    }
}

/// Vertical extent of all parts once scaled by `scale`
///
/// Returns `None` while a mesh is not in `meshes` yet or has no positions.
pub fn measure_parts(parts: &[ContainerPart], scale: f32, meshes: &Assets<Mesh>) -> Option<VerticalExtent> {
    let scaling = Transform::from_scale(Vec3::splat(scale));
    let mut points = Vec::new();
    for part in parts {
        let positions = meshes
            .get(&part.mesh)?
            .attribute(Mesh::ATTRIBUTE_POSITION)?
            .as_float3()?;
        let to_container = scaling * part.transform;
        points.extend(
            positions
                .iter()
                .map(|p| to_container.transform_point(Vec3::from_array(*p))),
        );
    }
    VerticalExtent::of_points(points)
}

/// A configured node that was found and measured
#[derive(Debug, Clone)]
pub struct FoundContainer {
    pub kind: ContainerKind,
    pub name: String,
    pub parts: Vec<ContainerPart>,
    pub extent: VerticalExtent,
}

/// Outcome of looking up the configured container nodes
#[derive(Debug, Clone)]
pub enum Classification {
    /// Some meshes are not in the asset collection yet
    Pending,
    /// Neither node exists or has geometry
    Empty,
    Found(Vec<FoundContainer>),
}

/// Look up the flask and tube nodes and measure them
///
/// `parts_of` returns a node's primitives, or `None` when the asset has no
/// node of that name. A missing node is logged and skipped.
pub fn classify_containers(
    config: &LabConfig,
    parts_of: impl Fn(&str) -> Option<Vec<ContainerPart>>,
    meshes: &Assets<Mesh>,
) -> Classification {
    let scale = config.profile.settings().asset_scale;
    let mut found = Vec::new();

    for (kind, name) in [
        (ContainerKind::Flask, config.asset.flask_node.as_str()),
        (ContainerKind::Tube, config.asset.tube_node.as_str()),
    ] {
        let Some(parts) = parts_of(name) else {
            warn!("[ASSETS] {}", LabError::MissingContainer { name: name.to_string() });
            continue;
        };
        if parts.is_empty() {
            warn!("[ASSETS] Node '{}' has no mesh primitives", name);
            continue;
        }
        let Some(extent) = measure_parts(&parts, scale, meshes) else {
            return Classification::Pending;
        };
        found.push(FoundContainer {
            kind,
            name: name.to_string(),
            parts,
            extent,
        });
    }

    if found.is_empty() {
        Classification::Empty
    } else {
        Classification::Found(found)
    }
}

/// Spawn a container pivot with its primitives re-parented below it
pub fn spawn_container(
    commands: &mut Commands,
    found: &FoundContainer,
    config: &LabConfig,
    glass: &Handle<StandardMaterial>,
) {
    let FoundContainer {
        kind,
        name,
        parts,
        extent,
    } = found;
    let kind = *kind;
    let scale = config.profile.settings().asset_scale;
    let (radius, x, fill) = match kind {
        ContainerKind::Flask => (
            config.asset.flask_liquid_radius,
            config.asset.flask_x,
            config.substance.flask_fill,
        ),
        ContainerKind::Tube => (
            config.asset.tube_liquid_radius,
            config.asset.tube_x,
            config.substance.tube_fill,
        ),
    };
    let container = Container::new(kind, extent.height(), radius).at_scale(scale);
    let resting = container.resting_translation(x);

    // Shift the geometry so its center lands on the container's center
    let shift = Vec3::Y * (container.center_offset().y - extent.center());
    let scaling = Transform::from_scale(Vec3::splat(scale));

    let mut entity = commands.spawn((
        Name::new(name.to_string()),
        container,
        FillLevel::new(fill),
        Transform::from_translation(resting),
        Visibility::default(),
    ));
    match kind {
        ContainerKind::Flask => entity.insert(Flask),
        ContainerKind::Tube => entity.insert(Tube { home: resting }),
    };

    entity.with_children(|parent| {
        for part in parts {
            parent.spawn((
                Mesh3d(part.mesh.clone()),
                MeshMaterial3d(glass.clone()),
                Transform::from_translation(shift) * scaling * part.transform,
            ));
        }
    });

    info!(
        "[ASSETS] {:?} '{}' classified: height {:.3}, {} primitive(s), at {:.2?}",
        kind,
        name,
        extent.height(),
        parts.len(),
        resting
    );
}
