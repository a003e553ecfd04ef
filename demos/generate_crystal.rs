//! Grow one random crystal at the world origin
//!
//! Usage: `cargo run --example generate_crystal [seed]`
//! Set `RUST_LOG=debug` to follow the build.

use crystal_genesis::*;
use log::info;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn main() -> Result<()> {
    env_logger::init();

    let mut rng = match std::env::args().nth(1).and_then(|s| s.parse::<u64>().ok()) {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };

    // Start from an empty scene
    let mut scene = Scene::new();
    scene.delete_all_objects();

    let ids = UniqueIdAllocator::new();
    let mut crystal = CrystalIndividual::new(&mut rng);
    info!("{}", crystal);
    crystal.compute_individual(&mut scene, &ids, DVec3::ZERO)?;
    info!("{}", crystal);

    println!("Genotype: {}", crystal.genotype_as_string());
    for part in crystal.sub_crystals() {
        let object = scene
            .object(&part.object)
            .ok_or_else(|| HostError::ObjectNotFound(part.object.to_string()))?;
        println!(
            "  {}: {}/{} cuts, {} faces, volume {:.3}, location {}",
            part.object,
            part.cuts_applied,
            part.cuts_requested,
            object.mesh.face_count(),
            object.world_mesh().volume(),
            part.transform.location,
        );
    }

    let mesh = scene.combined_mesh();
    println!("\nMesh statistics:");
    println!("  Vertices: {}", mesh.vertex_count());
    println!("  Triangles: {}", mesh.triangle_count());
    println!("  Indices: {}", mesh.indices.len());

    Ok(())
}
