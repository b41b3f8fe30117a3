pub mod types;
pub mod utils;

#[cfg(test)]
mod tests {
    use crate::types;

    #[test]
    fn health_type_ok() {
        let h = types::Health { status: "ok" };
        assert_eq!(h.status, "ok");
    }
}
