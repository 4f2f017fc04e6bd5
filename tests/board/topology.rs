use std::str::FromStr;

use morris_game::games::morris::topology::{position_at, COORDS, MILL_LINES};
use morris_game::games::morris::{UnsupportedVariant, Variant};

fn edge_count(variant: Variant) -> u32 {
    let topology = variant.topology();
    (0..24).map(|pos| topology.neighbors(pos).count() as u32).sum::<u32>() / 2
}

#[test]
fn adjacency_symmetric() {
    for variant in Variant::ALL {
        let topology = variant.topology();
        for a in 0..24 {
            assert!(!topology.neighbors(a).has(a), "{} is its own neighbor", a);
            for b in topology.neighbors(a) {
                assert!(topology.neighbors(b).has(a), "edge {}-{} is one sided in {:?}", a, b, variant);
            }
        }
    }
}

#[test]
fn edge_counts() {
    assert_eq!(edge_count(Variant::NineMen), 32);
    assert_eq!(edge_count(Variant::TwelveMen), 40);
}

#[test]
fn neighbors_nine_men() {
    let topology = Variant::NineMen.topology();
    let expected: &[(u8, &[u8])] = &[
        (0, &[1, 9]),
        (1, &[0, 2, 4]),
        (4, &[1, 3, 5, 7]),
        (10, &[3, 9, 11, 18]),
        (16, &[15, 17, 19]),
        (23, &[14, 22]),
    ];
    for &(pos, neighbors) in expected {
        let actual: Vec<u8> = topology.neighbors(pos).iter().collect();
        assert_eq!(actual, neighbors, "neighbors of {}", pos);
    }
}

#[test]
fn diagonals_twelve_men() {
    let topology = Variant::TwelveMen.topology();
    for [a, b, c] in [[0, 3, 6], [2, 5, 8], [21, 18, 15], [23, 20, 17]] {
        assert!(topology.neighbors(a).has(b));
        assert!(topology.neighbors(b).has(c));
        assert!(!topology.neighbors(a).has(c));
    }
    assert_eq!(topology.neighbors(3).count(), 4);
    assert_eq!(topology.neighbors(4).count(), 4);
}

#[test]
fn mill_lines() {
    for variant in Variant::ALL {
        let topology = variant.topology();
        assert_eq!(topology.all_mill_lines().len(), 16);

        for pos in 0..24 {
            let lines = topology.mill_lines(pos);
            assert_ne!(lines[0], lines[1]);
            for line in lines {
                assert!(line.contains(&pos));
                assert!(topology.all_mill_lines().contains(&line));
            }
        }
    }

    // consecutive cells of a line are always connected, also without diagonals
    let topology = Variant::NineMen.topology();
    for [a, b, c] in MILL_LINES {
        assert!(topology.neighbors(a).has(b));
        assert!(topology.neighbors(b).has(c));
    }
}

#[test]
fn coords_match_positions() {
    for pos in 0..24u8 {
        let (x, y) = COORDS[pos as usize];
        assert_eq!(position_at(x, y), Some(pos));
    }
    assert_eq!(position_at(3, 3), None);
    assert_eq!(position_at(1, 0), None);
}

#[test]
fn variant_parsing() {
    assert_eq!(Variant::from_piece_count(9), Ok(Variant::NineMen));
    assert_eq!(Variant::from_piece_count(12), Ok(Variant::TwelveMen));
    assert_eq!(Variant::from_piece_count(10), Err(UnsupportedVariant(10)));

    assert_eq!(Variant::from_str("12"), Ok(Variant::TwelveMen));
    assert!(Variant::from_str("three").is_err());

    for variant in Variant::ALL {
        assert_eq!(variant.to_string().parse::<Variant>(), Ok(variant));
        assert_eq!(variant.topology().variant(), variant);
        assert_eq!(variant.topology().required_pieces(), variant.required_pieces());
    }
}
