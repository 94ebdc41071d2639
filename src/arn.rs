//! Amazon Resource Name formatting.

use crate::error::QueryError;
use crate::region::Region;

/// ARN of an RDS database instance:
/// `arn:aws:rds:<region>:<account number>:db:<name>`.
///
/// `account` is the 12-digit account number. Dashes, as printed on the
/// console, are removed; leading zeros are kept.
pub fn rds_db(region: &Region, account: &str, name: &str) -> Result<String, QueryError> {
    let account: String = account.chars().filter(|c| *c != '-').collect();
    if account.len() != 12 || !account.bytes().all(|b| b.is_ascii_digit()) {
        return Err(QueryError::InvalidAccount(account));
    }
    Ok(["arn:aws:rds", region.name(), &account, "db", name].join(":"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rds_db_arn() {
        let region = Region::from_name("us-east-1").unwrap();
        assert_eq!(
            rds_db(&region, "661095214357", "mydb").unwrap(),
            "arn:aws:rds:us-east-1:661095214357:db:mydb"
        );
    }

    #[test]
    fn test_leading_zero_kept() {
        let region = Region::from_name("us-east-1").unwrap();
        assert_eq!(
            rds_db(&region, "012345678901", "mydb").unwrap(),
            "arn:aws:rds:us-east-1:012345678901:db:mydb"
        );
    }

    #[test]
    fn test_dashes_removed() {
        let region = Region::from_name("eu-west-1").unwrap();
        assert_eq!(
            rds_db(&region, "0123-4567-8901", "db-1").unwrap(),
            "arn:aws:rds:eu-west-1:012345678901:db:db-1"
        );
    }

    #[test]
    fn test_invalid_account() {
        let region = Region::default();
        for account in ["12345", "1234567890123", "12345678901a", ""] {
            match rds_db(&region, account, "mydb") {
                Err(QueryError::InvalidAccount(_)) => {}
                other => panic!("expected invalid account for {:?}, got {:?}", account, other),
            }
        }
    }
}
