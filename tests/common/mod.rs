//! Common test helpers shared across the integration suite.

use serial_holdings::{HoldingsConfig, Record};

/// Leader for a serial (continuing resource) record.
#[allow(dead_code)]
pub const SERIAL_LEADER: &str = "=LDR  00000cas a2200000 a 4500";

/// Leader for a holdings record.
#[allow(dead_code)]
pub const HOLDINGS_LEADER: &str = "=LDR  00000cy  a22000003  4500";

/// Fixed year used wherever "this year" matters.
#[allow(dead_code)]
pub const CURRENT_YEAR: i32 = 2024;

/// Configuration with the current year pinned to [`CURRENT_YEAR`].
#[allow(dead_code)]
pub fn test_config() -> HoldingsConfig {
    HoldingsConfig::new().with_current_year(CURRENT_YEAR)
}

/// Parse a serial record made of the standard leader plus `fields`.
#[allow(dead_code)]
pub fn serial_record(fields: &str) -> Record {
    Record::from_mnemonic(&format!("{SERIAL_LEADER}\n{fields}"))
        .unwrap_or_else(|e| panic!("test record should parse: {e}"))
}

/// A realistic serial record with identifiers, description and holdings.
#[allow(dead_code)]
pub fn create_realistic_serial() -> Record {
    serial_record(
        "=001  ocm01234567\n\
         =003  OCoLC\n\
         =008  850101c19859999nyuqr\\p\\\\\\\\\\\\\\0\\\\\\\\\\eng\\d\n\
         =010  \\\\$asn 85001234\n\
         =019  \\\\$a7654321$a1234567\n\
         =022  0\\$a0028-0836$l0028-0836$y1234-5678\n\
         =035  \\\\$a(OCoLC)ocm01234567$z(OCoLC)99887766\n\
         =245  00$aJournal of things :$bquarterly review.$nPart A,$pPhysics.\n\
         =260  \\\\$aNew York :$bThings Society,$c1985-\n\
         =362  0\\$aVol. 1, no. 1 (Jan. 1985)-\n\
         =853  20$81$av.$bno.$i(year)$j(month)\n\
         =863  40$81.1$a1-3$b1-12$i1985-1987$j01-12\n\
         =866  40$80$av.5-6 (1989-1990)\n\
         =867  40$80$a1991 annual\n",
    )
}
