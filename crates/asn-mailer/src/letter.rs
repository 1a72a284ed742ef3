use super::*;
use asn_core::Settings;

/// The notifications the engine knows how to send.
///
/// Borrowed fields are raw text; rendering escapes them for HTML.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Letter<'a> {
    /// A player has a new target to hunt.
    Target { game: &'a str, code: &'a str },
    /// Someone claims to have eliminated the recipient.
    Claim { game: &'a str, code: &'a str },
    /// The game has begun.
    Started { game: &'a str },
    /// The game is over and `winner` survived.
    Won { game: &'a str, winner: &'a str },
    /// The game was closed without a survivor being declared.
    Ended { game: &'a str },
}

impl Letter<'_> {
    pub fn subject(&self) -> &'static str {
        match self {
            Self::Target { .. } => "New Target Assigned",
            Self::Claim { .. } => "Were you eliminated?",
            Self::Started { .. } => "Your game has started!",
            Self::Won { .. } => "Someone won your game!",
            Self::Ended { .. } => "Your game has ended",
        }
    }
    pub fn html(&self, settings: &Settings) -> String {
        match self {
            Self::Target { game, code } => format!(
                "You were assigned a new target in the game {}; <a href='{}'>click here to log in and see who it is!</a>",
                escape(game),
                settings.game_link(&escape(code)),
            ),
            Self::Claim { game, code } => format!(
                "Were you eliminated in the game {}? If so, <a href='{}'>click here to log in and mark yourself as eliminated!</a>",
                escape(game),
                settings.game_link(&escape(code)),
            ),
            Self::Started { game } => format!(
                "Your game, {}, has started! Your first target will be emailed to you shortly.",
                escape(game),
            ),
            Self::Won { game, winner } => format!(
                "Congratulations to {}, the winner of {}.",
                escape(winner),
                escape(game),
            ),
            Self::Ended { game } => format!("Your game, {}, has ended.", escape(game)),
        }
    }
    /// Address the letter to a single recipient.
    pub fn to(&self, settings: &Settings, to: Address) -> Message {
        self.render(settings).to(to)
    }
    /// Address the letter to a blind list.
    pub fn broadcast(&self, settings: &Settings, bcc: Vec<Address>) -> Message {
        self.render(settings).bcc(bcc)
    }
    fn render(&self, settings: &Settings) -> Message {
        Message::new(
            Address::named(settings.sender_address(), settings.sender_name()),
            self.subject().to_string(),
            self.html(settings),
        )
    }
}

fn escape(text: &str) -> String {
    text.chars().fold(String::with_capacity(text.len()), |mut out, c| {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
        out
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn target_letter_links_join_code() {
        let settings = Settings::default().with_site("https://example.org");
        let message = Letter::Target {
            game: "Dorm Wars",
            code: "QX7",
        }
        .to(&settings, Address::new("ann@example.org"));
        assert_eq!(message.subject(), "New Target Assigned");
        assert!(message.html().contains("Dorm Wars"));
        assert!(message.html().contains("https://example.org/game.html?code=QX7"));
        assert_eq!(message.recipients(), &[Address::new("ann@example.org")]);
        assert!(message.blind().is_empty());
    }
    #[test]
    fn broadcast_uses_blind_list_and_sender() {
        let settings = Settings::default().with_sender("game@example.org", "Game Master");
        let message = Letter::Won {
            game: "Dorm Wars",
            winner: "Ann",
        }
        .broadcast(
            &settings,
            vec![Address::new("a@x.y"), Address::new("b@x.y")],
        );
        assert!(message.recipients().is_empty());
        assert_eq!(message.blind().len(), 2);
        assert_eq!(message.sender().to_string(), "Game Master <game@example.org>");
        assert_eq!(message.html(), "Congratulations to Ann, the winner of Dorm Wars.");
    }
    #[test]
    fn names_are_escaped() {
        let html = Letter::Started {
            game: "<script>&",
        }
        .html(&Settings::default());
        assert!(html.contains("&lt;script&gt;&amp;"));
        assert!(!html.contains("<script>"));
    }
}
