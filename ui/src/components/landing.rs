//! Public landing page: header, hero, about, team and footer
//!
//! Only the header has behaviour (mobile menu, shadow once scrolled). The
//! other sections are static content; the footer reads the year from the
//! injected clock.

use campus_ui_core::environment::Clock;
use campus_ui_core::{Effect, Reducer, SmallVec};
use chrono::{Datelike, FixedOffset};

/// Scroll offset after which the header gets its shadow
pub const SCROLL_THRESHOLD: f64 = 10.0;

/// Header state
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HeaderState {
    /// Mobile menu open
    pub menu_open: bool,
    /// Page scrolled past [`SCROLL_THRESHOLD`]
    pub scrolled: bool,
}

/// Header actions
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HeaderAction {
    /// Hamburger pressed
    ToggleMenu,
    /// A menu entry was followed
    CloseMenu,
    /// Page scrolled to this vertical offset
    Scrolled(f64),
}

/// Header reducer
#[derive(Clone, Copy, Debug, Default)]
pub struct HeaderReducer;

impl Reducer for HeaderReducer {
    type State = HeaderState;
    type Action = HeaderAction;
    type Environment = ();

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            HeaderAction::ToggleMenu => state.menu_open = !state.menu_open,
            HeaderAction::CloseMenu => state.menu_open = false,
            HeaderAction::Scrolled(offset) => state.scrolled = offset > SCROLL_THRESHOLD,
        }
        SmallVec::new()
    }
}

/// Anchor link in the header
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SectionLink {
    /// Link text
    pub label: &'static str,
    /// Target anchor
    pub anchor: &'static str,
}

/// Header links, in display order
pub const SECTION_LINKS: [SectionLink; 3] = [
    SectionLink {
        label: "Início",
        anchor: "#inicio",
    },
    SectionLink {
        label: "Sobre",
        anchor: "#sobre",
    },
    SectionLink {
        label: "Equipe",
        anchor: "#equipe",
    },
];

/// Hero section
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hero {
    /// Headline
    pub title: &'static str,
    /// Subheadline
    pub subtitle: &'static str,
    /// Primary button
    pub primary_cta: SectionLink,
    /// Secondary button
    pub secondary_cta: SectionLink,
}

/// Hero content
pub const HERO: Hero = Hero {
    title: "Eventos acadêmicos sem complicação",
    subtitle: "Inscreva-se, pague via PIX, receba seu ingresso e acumule certificados e conquistas.",
    primary_cta: SectionLink {
        label: "Ver eventos",
        anchor: "/events",
    },
    secondary_cta: SectionLink {
        label: "Saiba mais",
        anchor: "#sobre",
    },
};

/// One feature in the about section
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Feature {
    /// Feature title
    pub title: &'static str,
    /// Feature text
    pub description: &'static str,
}

/// About section features
pub const FEATURES: [Feature; 4] = [
    Feature {
        title: "Inscrições",
        description: "Palestras, workshops, minicursos e hackathons em um só lugar.",
    },
    Feature {
        title: "Pagamento via PIX",
        description: "Envie o comprovante e acompanhe a validação do seu pedido.",
    },
    Feature {
        title: "Check-in por QR Code",
        description: "Apresente o ingresso na entrada e tenha sua presença registrada.",
    },
    Feature {
        title: "Certificados",
        description: "Certificados com código de autenticidade e carga horária.",
    },
];

/// Team member card
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TeamMember {
    /// Name
    pub name: &'static str,
    /// Role in the project
    pub role: &'static str,
}

/// Team section
pub const TEAM: [TeamMember; 4] = [
    TeamMember {
        name: "Equipe de Produto",
        role: "Planejamento e design",
    },
    TeamMember {
        name: "Equipe de Front-end",
        role: "Interface e experiência",
    },
    TeamMember {
        name: "Equipe de Back-end",
        role: "API e integrações",
    },
    TeamMember {
        name: "Equipe de Qualidade",
        role: "Testes e validação",
    },
];

/// Render-ready footer
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FooterView {
    /// Copyright line
    pub copyright: String,
    /// Footer links
    pub links: [SectionLink; 3],
}

/// Render the footer with the current year in `offset`
#[must_use]
pub fn footer_view(clock: &dyn Clock, offset: FixedOffset) -> FooterView {
    let year = clock.now().with_timezone(&offset).year();
    FooterView {
        copyright: format!("© {year} Campus Events. Todos os direitos reservados."),
        links: SECTION_LINKS,
    }
}
