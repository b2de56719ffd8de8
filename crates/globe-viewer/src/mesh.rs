//! Mesh conversion from geoarc geometry to Bevy meshes.

use bevy::asset::RenderAssetUsages;
use bevy::mesh::{Indices, PrimitiveTopology};
use bevy::prelude::*;
use geoarc::MeshData;

/// Convert a geoarc triangle list to a Bevy mesh.
pub fn convert_mesh(data: &MeshData) -> Mesh {
    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::default(),
    );
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, data.positions.clone());
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, data.normals.clone());
    mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, data.uvs.clone());
    mesh.insert_indices(Indices::U32(data.indices.clone()));

    mesh
}

#[cfg(test)]
mod tests {
    use geoarc::SphereGeometry;

    use super::*;

    #[test]
    fn test_convert_mesh_counts() {
        let data = SphereGeometry::new(1.0, 8, 4).build().unwrap();
        let mesh = convert_mesh(&data);

        assert_eq!(mesh.count_vertices(), data.vertex_count());
        assert_eq!(mesh.indices().map(Indices::len), Some(data.indices.len()));
        assert!(mesh.attribute(Mesh::ATTRIBUTE_NORMAL).is_some());
        assert!(mesh.attribute(Mesh::ATTRIBUTE_UV_0).is_some());
    }
}
