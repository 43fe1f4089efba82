//! MAC address generation for machine interfaces.

use rand::RngCore;

/// QEMU/KVM organizationally unique identifier.
pub const QEMU_OUI: &str = "52:54:00";

const LOCAL_BIT: u8 = 0x02;
const UNICAST_MASK: u8 = 0xfe;

/// Generate a random, locally administered, unicast MAC under [`QEMU_OUI`].
///
/// The three trailing bytes come from the thread-local CSPRNG. Uniqueness
/// within a scenario is not checked.
pub fn generate_mac() -> String {
    let mut buf = [0u8; 3];
    rand::rng().fill_bytes(&mut buf);
    format_mac(buf)
}

fn format_mac(mut buf: [u8; 3]) -> String {
    buf[0] = (buf[0] | LOCAL_BIT) & UNICAST_MASK;
    format!("{QEMU_OUI}:{:02x}:{:02x}:{:02x}", buf[0], buf[1], buf[2])
}
