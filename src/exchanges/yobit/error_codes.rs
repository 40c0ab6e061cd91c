/// Known YoBit trade API error codes
const ERROR_CODES: &[(i64, &str)] = &[
    (503, "Too many requests (Http)"),
    (10000, "Required parameter can not be null"),
    (10001, "Requests are too frequent"),
    (10002, "System Error"),
    (10003, "Restricted list request, please try again later"),
    (10004, "IP restriction"),
    (10005, "Key does not exist"),
    (10006, "User does not exist"),
    (10007, "Signatures do not match"),
    (10008, "Illegal parameter"),
    (10009, "Order does not exist"),
    (10010, "Insufficient balance"),
    (10011, "Order is less than minimum trade amount"),
    (10012, "Unsupported symbol (not btc_usd or ltc_usd)"),
    (10013, "This interface only accepts https requests"),
    (10014, "Order price must be between 0 and 1,000,000"),
    (10015, "Order price differs from current market price too much"),
    (10016, "Insufficient coins balance"),
    (10017, "API authorization error"),
    (10026, "Loan (including reserved loan) and margin cannot be withdrawn"),
    (10027, "Cannot withdraw within 24 hrs of authentication information modification"),
    (10028, "Withdrawal amount exceeds daily limit"),
    (10029, "Account has unpaid loan, please cancel/pay off the loan before withdraw"),
    (10031, "Deposits can only be withdrawn after 6 confirmations"),
    (10032, "Please enabled phone/google authenticator"),
    (10033, "Fee higher than maximum network transaction fee"),
    (10034, "Fee lower than minimum network transaction fee"),
    (10035, "Insufficient BTC/LTC"),
    (10036, "Withdrawal amount too low"),
    (10037, "Trade password not set"),
    (10040, "Withdrawal cancellation fails"),
    (10041, "Withdrawal address not approved"),
    (10042, "Admin password error"),
    (10100, "User account frozen"),
    (10216, "Non-available API"),
];

pub fn lookup(code: i64) -> Option<&'static str> {
    ERROR_CODES
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, message)| *message)
}

/// Human readable message for a YoBit error code; unknown codes still get one
pub fn describe(code: i64) -> String {
    lookup(code).map_or_else(
        || format!("Unknown Yobit error code: {}", code),
        ToString::to_string,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes() {
        assert_eq!(describe(10007), "Signatures do not match");
        assert_eq!(describe(10010), "Insufficient balance");
        assert_eq!(describe(503), "Too many requests (Http)");
        assert_eq!(lookup(10216), Some("Non-available API"));
    }

    #[test]
    fn test_unknown_code_keeps_number() {
        assert_eq!(lookup(10018), None);
        assert_eq!(describe(10018), "Unknown Yobit error code: 10018");
    }

    #[test]
    fn test_table_has_no_duplicates() {
        let mut codes: Vec<_> = ERROR_CODES.iter().map(|(code, _)| *code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), ERROR_CODES.len());
    }
}
