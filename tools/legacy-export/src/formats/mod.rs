//! Interchange text formats (Wavefront OBJ + MTL)
//!
//! One OBJ file holds every mesh of a model. OBJ indices are global across
//! the whole file, so each mesh's faces are offset by the running number of
//! positions, UVs and normals written before it.

use anyhow::Result;
use std::io::Write;

use crate::material::Material;
use crate::mesh::AssembledMesh;

/// Running per-array totals of everything already written to the file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexOffsets {
    pub positions: u32,
    pub uvs: u32,
    pub normals: u32,
}

impl IndexOffsets {
    fn advance(&mut self, mesh: &AssembledMesh) {
        self.positions += mesh.positions.len() as u32;
        self.uvs += mesh.uvs.len() as u32;
        self.normals += mesh.normals.len() as u32;
    }
}

/// Write a complete OBJ geometry file
///
/// `material_lib` is the materials file name as referenced from the OBJ.
/// Returns the final offsets, i.e. the totals written.
pub fn write_obj<W: Write>(
    w: &mut W,
    material_lib: Option<&str>,
    meshes: &[AssembledMesh],
) -> Result<IndexOffsets> {
    writeln!(w, "# Exported by legacy-export")?;
    if let Some(lib) = material_lib {
        writeln!(w, "mtllib {}", lib)?;
    }

    let mut offsets = IndexOffsets::default();
    // Material state spans the whole file, not a single `o` block
    let mut current_material = None;
    for mesh in meshes {
        write_obj_mesh(w, mesh, offsets, &mut current_material)?;
        offsets.advance(mesh);
    }

    Ok(offsets)
}

fn write_obj_mesh<'a, W: Write>(
    w: &mut W,
    mesh: &'a AssembledMesh,
    offsets: IndexOffsets,
    current_material: &mut Option<&'a str>,
) -> Result<()> {
    writeln!(w, "o {}", mesh.name)?;

    for p in &mesh.positions {
        writeln!(w, "v {:.6} {:.6} {:.6}", p.x, p.y, p.z)?;
    }
    for uv in &mesh.uvs {
        writeln!(w, "vt {:.6} {:.6}", uv.x, uv.y)?;
    }
    for n in &mesh.normals {
        writeln!(w, "vn {:.6} {:.6} {:.6}", n.x, n.y, n.z)?;
    }

    for face in &mesh.faces {
        if *current_material != Some(face.material.as_str()) {
            writeln!(w, "usemtl {}", face.material)?;
            *current_material = Some(face.material.as_str());
        }

        write!(w, "f")?;
        for corner in face.polygon.corners() {
            // OBJ indices are 1-based
            write!(
                w,
                " {}/{}/{}",
                corner.position + offsets.positions + 1,
                corner.uv + offsets.uvs + 1,
                corner.normal + offsets.normals + 1
            )?;
        }
        writeln!(w)?;
    }

    Ok(())
}

/// Write a complete MTL materials file
///
/// Reflectance values are fixed placeholders; the texture carries the look.
pub fn write_mtl<W: Write>(w: &mut W, materials: &[Material]) -> Result<()> {
    writeln!(w, "# Exported by legacy-export")?;

    for material in materials {
        writeln!(w)?;
        writeln!(w, "newmtl {}", material.name)?;
        writeln!(w, "Ka 1.000000 1.000000 1.000000")?;
        writeln!(w, "Kd 1.000000 1.000000 1.000000")?;
        writeln!(w, "Ks 0.000000 0.000000 0.000000")?;
        writeln!(w, "d 1.000000")?;
        writeln!(w, "illum 1")?;
        if let Some(texture) = &material.texture {
            writeln!(w, "map_Kd {}", texture)?;
        }
    }

    Ok(())
}
