use ca2d_lib::{
    rules::{parse_rule, Generations, Life, LifeLike, Neighborhood, Rule, Snapshot},
    Cell, Color, Config, Error, Format, SaveError, State, World, ALIVE, DEAD,
};
use rand::{rngs::StdRng, SeedableRng};
use std::{collections::BTreeSet, error::Error as StdError, sync::Arc};

type TestResult = Result<(), Box<dyn StdError>>;

fn life_world(width: i32, height: i32) -> Result<World, Error> {
    World::new(width, height, Arc::new(Life), "test")
}

fn living_cells(world: &World) -> BTreeSet<(i32, i32)> {
    let mut cells = BTreeSet::new();
    for row in 0..world.height() as i32 {
        for col in 0..world.width() as i32 {
            if world.get_cell_state((row, col)).unwrap() == ALIVE {
                cells.insert((row, col));
            }
        }
    }
    cells
}

#[test]
fn new_world() -> TestResult {
    let world = life_world(7, 3)?;
    assert_eq!(world.width(), 7);
    assert_eq!(world.height(), 3);
    assert_eq!(world.generation(), 0);
    assert_eq!(world.name(), "test");
    assert_eq!(world.cells().count(), 21);
    assert!(world.cells().all(|c| c == Cell::new(DEAD)));
    Ok(())
}

#[test]
fn non_positive_size() {
    for (width, height) in [(0, 5), (5, 0), (-1, 5), (5, -3), (0, 0)] {
        assert!(matches!(
            life_world(width, height),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            Config::new(width, height).world(),
            Err(Error::InvalidArgument(_))
        ));
    }
}

#[test]
fn missing_rule() {
    let config = Config::new(5, 5).set_rule_string("");
    assert!(matches!(config.world(), Err(Error::InvalidArgument(_))));
}

#[test]
fn invalid_rule() {
    let config = Config::new(5, 5).set_rule_string("not a rule");
    assert!(matches!(config.world(), Err(Error::ParseRuleError(_))));
}

#[test]
fn lonely_cell_dies() -> TestResult {
    let mut world = life_world(5, 5)?;
    world.set_cell_state((2, 2), ALIVE)?;
    world.advance()?;
    assert!(living_cells(&world).is_empty());
    assert_eq!(world.generation(), 1);
    Ok(())
}

#[test]
fn blinker() -> TestResult {
    let mut world = life_world(6, 6)?;
    for col in 1..=3 {
        world.set_cell_state((2, col), ALIVE)?;
    }
    world.advance()?;
    let vertical: BTreeSet<_> = [(1, 2), (2, 2), (3, 2)].into_iter().collect();
    assert_eq!(living_cells(&world), vertical);
    world.advance()?;
    let horizontal: BTreeSet<_> = [(2, 1), (2, 2), (2, 3)].into_iter().collect();
    assert_eq!(living_cells(&world), horizontal);
    assert_eq!(world.generation(), 2);
    Ok(())
}

#[test]
fn committed_after_advance() -> TestResult {
    let mut world = life_world(6, 6)?;
    for col in 1..=3 {
        world.set_cell_state((2, col), ALIVE)?;
    }
    world.advance()?;
    assert!(world.cells().all(|c| c.previous() == c.next()));
    Ok(())
}

#[test]
fn block_in_corner() -> TestResult {
    let mut world = life_world(4, 4)?;
    for coord in [(0, 0), (0, 1), (1, 0), (1, 1)] {
        world.set_cell_state(coord, ALIVE)?;
    }
    world.advance_by(3)?;
    let block: BTreeSet<_> = [(0, 0), (0, 1), (1, 0), (1, 1)].into_iter().collect();
    assert_eq!(living_cells(&world), block);
    assert_eq!(world.generation(), 3);
    Ok(())
}

#[test]
fn no_wrapping() -> TestResult {
    // With a toroidal topology, (0, 0) would have 3 living neighbors.
    let mut world = life_world(4, 4)?;
    for coord in [(0, 3), (3, 0), (3, 3)] {
        world.set_cell_state(coord, ALIVE)?;
    }
    world.advance()?;
    assert_eq!(world.get_cell_state((0, 0))?, DEAD);
    assert!(living_cells(&world).is_empty());
    Ok(())
}

#[test]
fn corner_neighborhood() {
    let states = vec![ALIVE; 9];
    let snapshot = Snapshot::new(3, 3, &states);
    let nbhd = snapshot.neighborhood(0, 0);
    assert_eq!(nbhd.0.iter().flatten().count(), 3);
    assert_eq!(nbhd.sum(), 3);
    assert_eq!(snapshot.neighborhood(1, 1).sum(), 8);
    assert_eq!(snapshot.neighborhood(2, 1).sum(), 5);
}

#[test]
fn reset() -> TestResult {
    let mut world = life_world(6, 6)?;
    for col in 1..=3 {
        world.set_cell_state((2, col), ALIVE)?;
    }
    world.advance_by(5)?;
    world.set_cell_state((0, 0), State(9))?;
    world.reset();
    assert_eq!(world.generation(), 0);
    assert_eq!(world.population(), 0);
    assert!(world.cells().all(|c| c == Cell::new(DEAD)));
    Ok(())
}

#[test]
fn randomize() -> TestResult {
    let mut world = life_world(20, 20)?;
    world.advance()?;
    world.randomize(&mut StdRng::seed_from_u64(42))?;
    assert_eq!(world.generation(), 0);
    assert!(world
        .cells()
        .all(|c| (c.previous() == DEAD || c.previous() == ALIVE) && c.previous() == c.next()));
    assert!(world.population() > 0 && world.population() < 400);

    let mut other = life_world(20, 20)?;
    other.randomize(&mut StdRng::seed_from_u64(42))?;
    assert_eq!(world.plaintext(), other.plaintext());
    Ok(())
}

#[test]
fn colors() -> TestResult {
    let mut world = life_world(3, 3)?;
    world.set_cell_state((1, 1), ALIVE)?;
    world.set_cell_state((2, 2), State(5))?;
    assert_eq!(world.get_color((1, 1))?, Color::BLACK);
    assert_eq!(world.get_color((0, 0))?, Color::WHITE);
    assert_eq!(world.get_color((2, 2))?, Color::FALLBACK);
    Ok(())
}

#[test]
fn out_of_range() -> TestResult {
    let mut world = life_world(4, 3)?;
    for coord in [(-1, 0), (0, -1), (3, 0), (0, 4), (3, 4), (i32::MIN, i32::MAX)] {
        assert!(matches!(world.get_color(coord), Err(Error::OutOfRange(c)) if c == coord));
        assert!(matches!(world.get_cell(coord), Err(Error::OutOfRange(c)) if c == coord));
        assert!(matches!(
            world.set_cell_state(coord, ALIVE),
            Err(Error::OutOfRange(c)) if c == coord
        ));
    }
    assert_eq!(world.population(), 0);
    assert!(world.get_cell((2, 3)).is_ok());
    Ok(())
}

#[test]
fn set_cell_state() -> TestResult {
    let mut world = life_world(4, 3)?;
    world.set_cell_state((2, 3), State(4))?;
    assert_eq!(world.get_cell((2, 3))?, Cell::new(State(4)));
    assert_eq!(world.population(), 1);
    Ok(())
}

#[test]
fn plaintext() -> TestResult {
    let mut world = life_world(4, 2)?;
    world.set_cell_state((0, 1), ALIVE)?;
    world.set_cell_state((1, 3), State(3))?;
    assert_eq!(world.plaintext(), ".o..\n...C\n");
    Ok(())
}

#[test]
fn parse_rules() -> TestResult {
    assert_eq!(parse_rule("B3/S23")?.rule_string(), "B3/S23");
    assert_eq!(parse_rule("Life")?.rule_string(), "B3/S23");
    assert_eq!(parse_rule("B36/S23")?.rule_string(), "B36/S23");
    assert_eq!(parse_rule("B36/S23")?.states(), 2);
    let brain = parse_rule("B2/S/C3")?;
    assert_eq!(brain.rule_string(), "B2/S/C3");
    assert_eq!(brain.states(), 3);
    assert!(matches!(parse_rule("  "), Err(Error::InvalidArgument(_))));
    assert!(matches!(parse_rule("B9/S99"), Err(Error::ParseRuleError(_))));
    Ok(())
}

#[test]
fn highlife_replicator_birth() -> TestResult {
    let rule: LifeLike = "B36/S23".parse()?;
    let mut world = World::new(5, 5, Arc::new(rule), "highlife")?;
    // Six living neighbors around (2, 2).
    for coord in [(1, 1), (1, 2), (1, 3), (3, 1), (3, 2), (3, 3)] {
        world.set_cell_state(coord, ALIVE)?;
    }
    world.advance()?;
    assert_eq!(world.get_cell_state((2, 2))?, ALIVE);
    Ok(())
}

#[test]
fn brians_brain() -> TestResult {
    let rule: Generations = "B2/S/C3".parse()?;
    let mut world = World::new(5, 5, Arc::new(rule), "brain")?;
    world.set_cell_state((2, 1), ALIVE)?;
    world.set_cell_state((2, 3), ALIVE)?;
    world.advance()?;
    assert_eq!(world.get_cell_state((2, 1))?, State(2));
    assert_eq!(world.get_cell_state((2, 3))?, State(2));
    assert_eq!(world.get_cell_state((1, 2))?, ALIVE);
    assert_eq!(world.get_cell_state((3, 2))?, ALIVE);
    world.advance()?;
    assert_eq!(world.get_cell_state((2, 1))?, DEAD);
    assert_eq!(world.get_cell_state((1, 2))?, State(2));
    assert_eq!(world.get_color((1, 2))?, Color::gray(0.5));
    Ok(())
}

#[test]
fn malformed_snapshot() {
    let states = vec![DEAD; 6];
    let mut next = vec![DEAD; 6];
    assert!(matches!(
        Life.transition(Snapshot::new(4, 2, &states), &mut next),
        Err(Error::InvalidInput(_))
    ));
    assert!(matches!(
        Life.transition(Snapshot::new(0, 0, &[]), &mut []),
        Err(Error::InvalidInput(_))
    ));
    assert!(matches!(
        Life.transition(Snapshot::new(3, 2, &states), &mut next[..4]),
        Err(Error::InvalidInput(_))
    ));
    assert!(matches!(
        Life.randomize(&mut [], &mut StdRng::seed_from_u64(0)),
        Err(Error::InvalidInput(_))
    ));
}

#[test]
fn neighborhood_outside_the_grid() {
    let states = vec![ALIVE; 4];
    let snapshot = Snapshot::new(2, 2, &states);
    assert_eq!(snapshot.neighborhood(1, 1).count(ALIVE), 3);
    assert_eq!(snapshot.neighborhood(2, 0), Default::default());
    assert_eq!(snapshot.neighborhood(i32::MAX as usize, 0), Default::default());
    assert_eq!(snapshot.neighborhood(0, usize::MAX), Default::default());
}

/// A rule without any state.
#[derive(Debug)]
struct Empty;

impl Rule for Empty {
    fn states(&self) -> u32 {
        0
    }

    fn rule_string(&self) -> String {
        String::from("empty")
    }

    fn next_state(&self, state: State, _: &Neighborhood) -> State {
        state
    }

    fn state_color(&self, _: State) -> Color {
        Color::FALLBACK
    }
}

#[test]
fn rule_without_states() -> TestResult {
    let mut world = World::new(2, 2, Arc::new(Empty), "empty")?;
    world.advance()?;
    assert!(matches!(
        world.randomize(&mut StdRng::seed_from_u64(1)),
        Err(Error::InvalidInput(_))
    ));
    assert_eq!(world.generation(), 1);
    assert!(world.cells().all(|c| c == Cell::new(DEAD)));
    Ok(())
}

#[test]
fn cell_commit() {
    let mut cell = Cell::new(DEAD);
    cell.set_next(ALIVE);
    assert_eq!(cell.previous(), DEAD);
    assert_eq!(cell.next(), ALIVE);
    cell.commit();
    assert_eq!(cell.previous(), ALIVE);
    assert_eq!(cell.previous(), cell.next());

    cell.set_previous(State(2));
    assert_eq!(cell.previous(), State(2));
    assert_eq!(cell.next(), ALIVE);
    assert_eq!(cell.to_string(), "2");
}

#[test]
fn ser() -> TestResult {
    for format in [Format::Binary, Format::Json] {
        let mut world = life_world(8, 5)?;
        world.randomize(&mut StdRng::seed_from_u64(7))?;
        world.advance_by(2)?;
        let text = world.plaintext();
        let bytes = world.serialize(format)?;

        let mut new_world = life_world(8, 5)?;
        new_world.advance()?;
        new_world.deserialize(format, &bytes)?;
        assert_eq!(new_world.plaintext(), text);
        assert_eq!(new_world.generation(), 0);
        assert!(new_world.cells().eq(world.cells()));
        assert_eq!(new_world.ser(), world.ser());
    }
    Ok(())
}

#[test]
fn malformed_save() -> TestResult {
    let mut world = life_world(6, 6)?;
    world.randomize(&mut StdRng::seed_from_u64(3))?;
    world.advance_by(4)?;
    let before = world.ser();
    let generation = world.generation();

    let good = world.serialize(Format::Binary)?;
    let inputs = [
        Vec::new(),
        vec![0xff; 3],
        good[..good.len() / 2].to_vec(),
        [good.as_slice(), &[0]].concat(),
    ];
    for bytes in inputs.iter() {
        let result = world.deserialize(Format::Binary, bytes);
        assert!(matches!(result, Err(Error::SerializationError(_))));
        assert_eq!(world.ser(), before);
        assert_eq!(world.generation(), generation);
    }

    let result = world.deserialize(Format::Json, b"{\"version\": 1}");
    assert!(matches!(result, Err(Error::SerializationError(_))));
    assert_eq!(world.ser(), before);
    Ok(())
}

#[test]
fn wrong_version_or_size() -> TestResult {
    let mut world = life_world(3, 2)?;
    let json = r#"{"version":2,"width":3,"height":2,"cells":[[0,0],[0,0],[0,0],[0,0],[0,0],[0,0]]}"#;
    assert!(matches!(
        world.deserialize(Format::Json, json.as_bytes()),
        Err(Error::SerializationError(SaveError::UnsupportedVersion(2)))
    ));

    let json = r#"{"version":1,"width":3,"height":2,"cells":[[0,0],[1,1]]}"#;
    assert!(matches!(
        world.deserialize(Format::Json, json.as_bytes()),
        Err(Error::SerializationError(SaveError::CellCountMismatch(6, 2)))
    ));

    let bytes = life_world(2, 3)?.serialize(Format::Binary)?;
    assert!(matches!(
        world.deserialize(Format::Binary, &bytes),
        Err(Error::SerializationError(SaveError::SizeMismatch((2, 3), (3, 2))))
    ));
    Ok(())
}

#[test]
fn save_and_load() -> TestResult {
    let dir = std::env::temp_dir();
    for ext in ["bin", "json"] {
        let path = dir.join(format!("ca2d-test-{}.{}", std::process::id(), ext));
        let mut world = life_world(10, 10)?;
        world.randomize(&mut StdRng::seed_from_u64(11))?;
        world.save(&path)?;

        let mut new_world = life_world(10, 10)?;
        new_world.load(&path)?;
        std::fs::remove_file(&path)?;
        assert_eq!(new_world.ser(), world.ser());
    }

    let mut world = life_world(10, 10)?;
    let missing = dir.join(format!("ca2d-missing-{}.bin", std::process::id()));
    assert!(matches!(
        world.load(&missing),
        Err(Error::SerializationError(SaveError::Io(_)))
    ));
    Ok(())
}
