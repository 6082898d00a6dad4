//! Arithmetic challenge the front end shows before every login attempt.

use rand::Rng;

use crate::error::ClientError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Challenge {
    pub a: u32,
    pub b: u32,
}

impl Challenge {
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            a: rng.gen_range(1..=10),
            b: rng.gen_range(1..=10),
        }
    }

    pub fn answer(&self) -> u32 {
        self.a + self.b
    }

    pub fn prompt(&self) -> String {
        format!("CAPTCHA: ¿Cuánto es {} + {}?", self.a, self.b)
    }

    pub fn check(&self, answer: &str) -> Result<(), ClientError> {
        let answer = answer.trim();
        if answer.is_empty() {
            return Err(ClientError::ChallengeMissing);
        }
        let value: i64 = answer.parse().map_err(|_| ClientError::ChallengeInvalid)?;
        if value != i64::from(self.answer()) {
            return Err(ClientError::ChallengeFailed);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_generate_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let challenge = Challenge::generate(&mut rng);
            assert!((1..=10).contains(&challenge.a));
            assert!((1..=10).contains(&challenge.b));
        }
    }

    #[test]
    fn test_prompt() {
        let challenge = Challenge { a: 3, b: 9 };
        assert_eq!(challenge.prompt(), "CAPTCHA: ¿Cuánto es 3 + 9?");
    }

    #[test]
    fn test_check() {
        let challenge = Challenge { a: 3, b: 9 };
        assert!(challenge.check(" 12 ").is_ok());
        assert_matches!(challenge.check(""), Err(ClientError::ChallengeMissing));
        assert_matches!(challenge.check("doce"), Err(ClientError::ChallengeInvalid));
        assert_matches!(challenge.check("11"), Err(ClientError::ChallengeFailed));
        assert_eq!(
            ClientError::ChallengeFailed.to_string(),
            "CAPTCHA incorrecto. Intente nuevamente."
        );
    }
}
