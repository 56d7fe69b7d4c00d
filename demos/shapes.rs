//! A small shape catalogue stored as `Choice` values.
//!
//! Run with `cargo run --example shapes`.

use std::collections::BTreeSet;

use sumcell::prelude::*;

sumcell::variants! {
    pub mod shape {
        Circle(f64),
        Rect(f64, f64),
        Named(String),
        Point(),
    }
}

type Shape = Choice<shape::Variants>;

fn area(s: &Shape) -> f64 {
    match s.which() {
        shape::Tag::Circle => {
            let r = *s.as_arm::<shape::Circle>();
            std::f64::consts::PI * r * r
        }
        shape::Tag::Rect => {
            let (w, h) = *s.as_arm::<shape::Rect>();
            w * h
        }
        shape::Tag::Named | shape::Tag::Point => 0.0,
    }
}

sumcell::variants! {
    pub mod key {
        Id(u32),
        Label(String),
    }
}

fn main() {
    let mut shapes = vec![
        Shape::with::<shape::Circle>(1.5),
        Shape::with::<shape::Rect>((2.0, 3.0)),
        Shape::with::<shape::Named>("triangle".to_string()),
        Shape::with_empty::<shape::Point>(),
    ];

    for s in &shapes {
        println!("{s:?} area={:.2}", area(s));
    }

    shapes[3].set::<shape::Circle>(0.5);
    let taken = shapes[2].take();
    println!("took {taken:?}, left behind {:?}", shapes[2]);

    shapes.retain(|s| !s.is_moved_from());
    shapes.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    println!("sorted: {shapes:?}");

    let keys: BTreeSet<Choice<key::Variants>> = [
        Choice::with::<key::Label>("b".to_string()),
        Choice::with::<key::Id>(7),
        Choice::with::<key::Label>("a".to_string()),
        Choice::with::<key::Id>(2),
    ]
    .into_iter()
    .collect();
    println!("keys: {keys:?}");
}
