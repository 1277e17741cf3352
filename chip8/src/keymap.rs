use anyhow::{anyhow, bail};

use duo8::Keys;

/// Parses `code=key` where key is a single hex digit, e.g. `p=1`
pub fn parse_binding(s: &str) -> anyhow::Result<(char, u8)> {
    let (code, key) = s
        .split_once('=')
        .ok_or_else(|| anyhow!("expected CODE=KEY, got {:?}", s))?;
    let mut chars = code.chars();
    let code = match (chars.next(), chars.next()) {
        (Some(c), None) => c,
        _ => bail!("input code must be a single character, got {:?}", code),
    };
    let key = u8::from_str_radix(key, 16)?;
    if key > 0xF {
        bail!("key must be 0-F, got {:X}", key);
    }
    Ok((code, key))
}

/// Applies extra bindings, then presses the key bound to every char of `held`
pub fn hold(keys: &mut Keys, bindings: &[(char, u8)], held: &str) -> anyhow::Result<()> {
    for &(code, key) in bindings {
        keys.bind(code, key);
    }
    for code in held.chars() {
        if keys.press_code(code.to_ascii_lowercase()).is_none() {
            bail!("{:?} isn't bound to any key", code);
        }
    }
    Ok(())
}

#[cfg(test)]
mod test_keymap {
    use super::*;

    #[test]
    fn test_parse_binding() {
        assert_eq!(parse_binding("p=1").unwrap(), ('p', 0x1));
        assert_eq!(parse_binding("k=f").unwrap(), ('k', 0xF));
        assert!(parse_binding("p").is_err());
        assert!(parse_binding("pq=1").is_err());
        assert!(parse_binding("p=10").is_err());
        assert!(parse_binding("p=g").is_err());
    }

    #[test]
    fn test_hold_presses_bound_keys() {
        let mut keys = Keys::new();
        hold(&mut keys, &[('p', 0x2)], "QP").unwrap();
        assert!(keys.is_pressed(0x4));
        assert!(keys.is_pressed(0x2));
        assert_eq!(keys.first_pressed(), Some(0x2));
    }

    #[test]
    fn test_hold_rejects_unbound() {
        let mut keys = Keys::new();
        assert!(hold(&mut keys, &[], "]").is_err());
    }
}
