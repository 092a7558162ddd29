use priyam::chemistry::{composition, molar_mass};

fn main() {
    for formula in ["H2O", "C6H12O6", "Ca(OH)2", "K4(Fe(CN)6)"] {
        match molar_mass(formula).and_then(|mass| Ok((mass, composition(formula)?))) {
            Ok((mass, atoms)) => println!("{formula}: {mass:.3} g/mol {atoms:?}"),
            Err(err) => eprintln!("{formula}: {err}"),
        }
    }
}
