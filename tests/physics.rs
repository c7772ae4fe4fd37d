mod common;

use cgmath::{Point3, Vector3};
use common::recording_world;
use voxel_world::engine_state::physics::{Aabb, FallingBox};
use voxel_world::engine_state::voxels::block::block_type::BlockType;
use voxel_world::engine_state::voxels::generation::{EmptyGenerator, FlatGenerator};

const DT: f32 = 1.0 / 60.0;

#[test]
fn falling_box_comes_to_rest_on_the_floor() {
    let (mut world, _) = recording_world(FlatGenerator::new(10), 0, 1);
    world.load_chunk(0, 0);

    let mut body = FallingBox::new(Point3::new(2.25, 15.0, 2.25), Vector3::new(0.5, 1.75, 0.5));
    for _ in 0..200 {
        body.update(&world, DT);
    }

    assert_eq!(body.position().y, 10.0);
    assert_eq!(body.velocity.y, 0.0);
    assert!(body.is_grounded());
}

#[test]
fn box_in_free_fall_is_not_grounded() {
    let (mut world, _) = recording_world(EmptyGenerator, 0, 1);
    world.load_chunk(0, 0);

    let mut body = FallingBox::new(Point3::new(2.0, 100.0, 2.0), Vector3::new(0.5, 0.5, 0.5));
    for _ in 0..10 {
        body.update(&world, DT);
    }

    assert!(!body.is_grounded());
    assert!(body.position().y < 100.0);
    assert!(body.velocity.y < 0.0);
    assert!(!body.jump(5.0));
}

#[test]
fn jumping_leaves_the_ground_and_lands_again() {
    let (mut world, _) = recording_world(FlatGenerator::new(10), 0, 1);
    world.load_chunk(0, 0);

    let mut body = FallingBox::new(Point3::new(4.25, 10.0, 4.25), Vector3::new(0.5, 1.75, 0.5));
    body.update(&world, DT);
    assert!(body.is_grounded());

    assert!(body.jump(8.0));
    assert!(!body.jump(8.0));
    body.update(&world, DT);
    assert!(body.position().y > 10.0);
    assert!(!body.is_grounded());

    for _ in 0..120 {
        body.update(&world, DT);
    }
    assert_eq!(body.position().y, 10.0);
    assert!(body.is_grounded());
}

#[test]
fn diagonal_movement_into_a_corner_never_penetrates() {
    let (mut world, _) = recording_world(EmptyGenerator, 0, 1);
    world.load_chunk(0, 0);
    let blocks = [(3, 5, 2), (2, 5, 3)];
    for (x, y, z) in blocks {
        world.set_block(x, y, z, BlockType::STONE.id());
    }

    let mut body =
        FallingBox::new(Point3::new(1.25, 5.0, 1.25), Vector3::new(0.5, 0.5, 0.5)).with_gravity(0.0);
    for _ in 0..5 {
        body.aabb.move_by(Vector3::new(1.0, 0.0, 1.0));
        body.update(&world, DT);

        for (x, y, z) in blocks {
            assert!(
                !body.aabb.intersects(&Aabb::block(x, y, z)),
                "box at {:?} entered block ({x}, {y}, {z})",
                body.position()
            );
        }
    }

    assert_eq!(body.position(), Point3::new(2.5, 5.0, 2.5));
}

#[test]
fn sliding_along_a_wall_keeps_the_free_axis() {
    let (mut world, _) = recording_world(EmptyGenerator, 0, 1);
    world.load_chunk(0, 0);
    for z in 0..16 {
        world.set_block(6, 5, z, BlockType::STONE.id());
    }

    let mut body =
        FallingBox::new(Point3::new(5.0, 5.0, 2.0), Vector3::new(0.5, 0.5, 0.5)).with_gravity(0.0);
    body.aabb.move_by(Vector3::new(1.0, 0.0, 1.0));
    body.update(&world, DT);

    assert_eq!(body.position(), Point3::new(5.5, 5.0, 3.0));
}
