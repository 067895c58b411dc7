use yew::prelude::*;

use crate::config;
use crate::contact::{ContactSection, CONTACT_CARDS};
use crate::counter::HeroStat;
use crate::gallery::{GallerySection, GALLERY};
use crate::nav::{AnchorLink, Header};
use crate::reveal::{group_offsets, use_in_view, Reveal};
use crate::scroll::{use_scroll_state, Parallax};

const SERVICES: &[(&str, &str)] = &[
    ("Charpente traditionnelle", "Taille et levage de charpentes en chêne, douglas ou épicéa, assemblages tenon-mortaise."),
    ("Maison ossature bois", "Conception et construction de maisons à ossature bois, du plan à la mise hors d'eau."),
    ("Extension & surélévation", "Agrandir sans déménager : structures légères adaptées aux constructions existantes."),
    ("Rénovation", "Diagnostic, traitement et reprise de charpentes anciennes dans le respect du bâti."),
    ("Aménagement extérieur", "Terrasses, carports, pergolas et bardages en essences locales."),
    ("Isolation biosourcée", "Fibre de bois, ouate de cellulose : des parois performantes et saines."),
];

const VALUES: &[(&str, &str)] = &[
    ("Savoir-faire", "Trois générations de charpentiers dans les Flandres."),
    ("Bois local", "Essences issues de forêts gérées durablement, à moins de 300 km."),
    ("Transparence", "Devis détaillé, planning tenu, un seul interlocuteur."),
    ("Garantie", "Décennale et parfait achèvement sur tous nos ouvrages."),
];

const COMMITMENTS: &[(&str, &str)] = &[
    ("Chantier propre", "Tri des déchets et valorisation des chutes de bois."),
    ("Délais respectés", "Un planning partagé dès la signature du devis."),
    ("Suivi après travaux", "Visite de contrôle offerte un an après réception."),
];

const TESTIMONIALS: &[(&str, &str, &str)] = &[
    ("Une équipe à l'écoute, une charpente superbe. Le chantier a été tenu dans les délais.", "Julien D.", "Cassel"),
    ("Notre extension ossature bois a été livrée en six semaines, finitions impeccables.", "Sophie et Marc L.", "Marcq-en-Barœul"),
    ("Rénovation de notre longère menée avec beaucoup de soin et de conseils.", "Hélène P.", "Bergues"),
];

const HERO_STATS: &[(&str, &str)] = &[
    ("150+", "Chantiers réalisés"),
    ("25", "Ans d'expérience"),
    ("98%", "Clients satisfaits"),
];

#[derive(Properties, PartialEq)]
struct HeroProps {
    parallax: Option<Parallax>,
}

#[function_component(Hero)]
fn hero(props: &HeroProps) -> Html {
    let node = use_node_ref();
    let counting = use_in_view(node.clone(), config::COUNTER_TRIGGER_RATIO);
    let content_style = props.parallax.map(|p| p.style());

    html! {
        <section id="accueil" class="hero" ref={node}>
            <div class="hero__content container" style={content_style}>
                <h1 class="hero__title">{"Charpente & ossature bois dans le Nord"}</h1>
                <p class="hero__subtitle">
                    {"Nord Bois Structure conçoit, taille et pose vos structures bois, de la charpente traditionnelle à la maison passive."}
                </p>
                <div class="hero__actions">
                    <AnchorLink href="#contact" class={classes!("btn", "btn--primary")}>{"Demander un devis"}</AnchorLink>
                    <AnchorLink href="#realisations" class={classes!("btn", "btn--ghost")}>{"Voir nos réalisations"}</AnchorLink>
                </div>
                <div class="hero__stats">
                    { for HERO_STATS.iter().map(|(value, label)| html! {
                        <HeroStat value={*value} label={*label} running={counting} />
                    }) }
                </div>
            </div>
        </section>
    }
}

/// First stagger index of each revealed group, in page order: services,
/// values, commitments, gallery, testimonials, contact cards.
fn reveal_offsets() -> [usize; 6] {
    group_offsets([
        SERVICES.len(),
        VALUES.len(),
        COMMITMENTS.len(),
        GALLERY.len(),
        TESTIMONIALS.len(),
        CONTACT_CARDS,
    ])
}

#[function_component(Home)]
pub fn home() -> Html {
    let scroll = use_scroll_state();

    let floating_cta = scroll.floating_cta_visible.map(|visible| {
        let style = if visible {
            "opacity: 1; pointer-events: auto;"
        } else {
            "opacity: 0; pointer-events: none;"
        };
        html! {
            <div class="floating-cta" style={style}>
                <AnchorLink href="#contact">{"Devis gratuit"}</AnchorLink>
            </div>
        }
    });

    let [services, values, commitments, gallery, testimonials, contact] = reveal_offsets();

    html! {
        <>
            <style>{PAGE_CSS}</style>
            <Header scroll={scroll.clone()} />
            <main>
                <Hero parallax={scroll.parallax} />

                <section id="services" class="services section">
                    <div class="container">
                        <h2 class="section__title">{"Nos services"}</h2>
                        <div class="services__grid">
                            { for SERVICES.iter().enumerate().map(|(i, (title, text))| html! {
                                <Reveal class={classes!("service-card")} index={services + i}>
                                    <h3>{*title}</h3>
                                    <p>{*text}</p>
                                </Reveal>
                            }) }
                        </div>
                    </div>
                </section>

                <section id="apropos" class="about section">
                    <div class="container">
                        <h2 class="section__title">{"L'atelier"}</h2>
                        <p class="about__intro">
                            {"Installés près de Lille depuis 1999, nous travaillons le bois massif et les panneaux ossature pour les particuliers comme pour les collectivités."}
                        </p>
                        <div class="about__values">
                            { for VALUES.iter().enumerate().map(|(i, (title, text))| html! {
                                <Reveal class={classes!("about__value")} index={values + i}>
                                    <h3>{*title}</h3>
                                    <p>{*text}</p>
                                </Reveal>
                            }) }
                        </div>
                        <div class="about__commitments">
                            { for COMMITMENTS.iter().enumerate().map(|(i, (title, text))| html! {
                                <Reveal class={classes!("commitment")} index={commitments + i}>
                                    <h4>{*title}</h4>
                                    <p>{*text}</p>
                                </Reveal>
                            }) }
                        </div>
                    </div>
                </section>

                <GallerySection reveal_offset={gallery} />

                <section id="temoignages" class="testimonials section">
                    <div class="container">
                        <h2 class="section__title">{"Ils nous ont fait confiance"}</h2>
                        <div class="testimonials__grid">
                            { for TESTIMONIALS.iter().enumerate().map(|(i, (quote, author, town))| html! {
                                <Reveal class={classes!("testimonial")} index={testimonials + i}>
                                    <blockquote>{*quote}</blockquote>
                                    <p class="testimonial__author">{*author}<span>{format!(" · {}", town)}</span></p>
                                </Reveal>
                            }) }
                        </div>
                    </div>
                </section>

                <ContactSection reveal_offset={contact} />
            </main>

            <footer class="footer">
                <div class="container">
                    <p>{"© Nord Bois Structure · Charpente et ossature bois · Lille"}</p>
                </div>
            </footer>

            { floating_cta.unwrap_or_default() }
        </>
    }
}

const PAGE_CSS: &str = r#"
    :root {
        --wood: #8B5A2B;
        --forest: #2D5A3D;
        --cream: #FAF6F0;
        --ink: #1F1F1F;
    }
    body {
        margin: 0;
        font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, Helvetica, Arial, sans-serif;
        color: var(--ink);
        background: var(--cream);
    }
    .container {
        max-width: 1140px;
        margin: 0 auto;
        padding: 0 1.5rem;
    }
    .section {
        padding: 6rem 0;
    }
    .section__title {
        font-size: 2.2rem;
        margin-bottom: 2.5rem;
        color: var(--forest);
    }
    .header {
        position: fixed;
        top: 0;
        left: 0;
        right: 0;
        z-index: 1000;
        padding: 1.5rem 0;
        transition: all 0.3s ease;
    }
    .header.scrolled {
        padding: 0.75rem 0;
        background: rgba(250, 246, 240, 0.96);
        box-shadow: 0 2px 16px rgba(0, 0, 0, 0.08);
    }
    .nav {
        display: flex;
        align-items: center;
        justify-content: space-between;
    }
    .nav__logo {
        font-weight: 700;
        font-size: 1.3rem;
        color: var(--ink);
        text-decoration: none;
    }
    .nav__logo span {
        color: var(--wood);
    }
    .nav__list {
        display: flex;
        gap: 2rem;
        list-style: none;
        margin: 0;
        padding: 0;
    }
    .nav__link {
        color: var(--ink);
        text-decoration: none;
        position: relative;
    }
    .nav__link.active {
        color: var(--wood);
    }
    .nav__link.active::after {
        content: '';
        position: absolute;
        left: 0;
        right: 0;
        bottom: -6px;
        height: 2px;
        background: var(--wood);
    }
    .nav__toggle, .nav__close {
        display: none;
        background: none;
        border: none;
        cursor: pointer;
    }
    .nav__toggle span {
        display: block;
        width: 24px;
        height: 2px;
        margin: 5px 0;
        background: var(--ink);
    }
    @media (max-width: 768px) {
        .nav__toggle, .nav__close {
            display: block;
        }
        .nav__menu {
            position: fixed;
            top: 0;
            right: -100%;
            width: 75%;
            height: 100vh;
            padding: 5rem 2rem;
            background: var(--cream);
            box-shadow: -4px 0 24px rgba(0, 0, 0, 0.15);
            transition: right 0.3s ease;
        }
        .nav__menu.active {
            right: 0;
        }
        .nav__list {
            flex-direction: column;
        }
        .nav__close {
            position: absolute;
            top: 1.5rem;
            right: 1.5rem;
            font-size: 2rem;
        }
    }
    .hero {
        min-height: 100vh;
        display: flex;
        align-items: center;
        background: linear-gradient(135deg, #3b2a1a 0%, #2D5A3D 100%);
        color: white;
    }
    .hero__stats {
        display: flex;
        gap: 3rem;
        margin-top: 3rem;
    }
    .hero__stat-number {
        display: block;
        font-size: 2.5rem;
        font-weight: 700;
    }
    .btn {
        display: inline-block;
        padding: 0.9rem 1.8rem;
        border-radius: 6px;
        text-decoration: none;
        font-weight: 600;
        border: none;
        cursor: pointer;
    }
    .btn--primary {
        background: var(--wood);
        color: white;
    }
    .btn--primary:disabled {
        opacity: 0.7;
        cursor: wait;
    }
    .btn--ghost {
        color: white;
        border: 1px solid rgba(255, 255, 255, 0.6);
        margin-left: 1rem;
    }
    .services__grid, .about__values, .testimonials__grid, .gallery__grid {
        display: grid;
        grid-template-columns: repeat(auto-fit, minmax(240px, 1fr));
        gap: 1.5rem;
    }
    .service-card, .about__value, .commitment, .testimonial, .contact__card {
        background: white;
        border-radius: 10px;
        padding: 1.5rem;
        box-shadow: 0 4px 18px rgba(0, 0, 0, 0.06);
    }
    .fade-in {
        opacity: 0;
        transform: translateY(30px);
        transition: opacity 0.6s ease, transform 0.6s ease;
    }
    .fade-in.visible {
        opacity: 1;
        transform: translateY(0);
    }
    .gallery__filters {
        display: flex;
        flex-wrap: wrap;
        gap: 0.75rem;
        margin-bottom: 2rem;
    }
    .gallery__filter {
        padding: 0.5rem 1.2rem;
        border-radius: 999px;
        border: 1px solid var(--wood);
        background: none;
        cursor: pointer;
    }
    .gallery__filter.active {
        background: var(--wood);
        color: white;
    }
    .gallery__item {
        cursor: pointer;
        border-radius: 10px;
        overflow: hidden;
        background: white;
    }
    .gallery__placeholder {
        height: 200px;
        background: linear-gradient(135deg, #c9a27a, #8B5A2B);
        display: flex;
        align-items: flex-end;
        padding: 0.75rem;
    }
    .gallery__overlay {
        padding: 1rem;
    }
    .lightbox {
        position: fixed;
        inset: 0;
        z-index: 2000;
        display: none;
        align-items: center;
        justify-content: center;
        gap: 1rem;
        background: rgba(0, 0, 0, 0.9);
    }
    .lightbox.active {
        display: flex;
    }
    .lightbox__img {
        width: min(80vw, 900px);
        height: min(60vh, 600px);
        background: linear-gradient(135deg, #c9a27a, #8B5A2B);
        border-radius: 8px;
    }
    .lightbox figcaption {
        color: white;
        text-align: center;
        margin-top: 1rem;
    }
    .lightbox__close, .lightbox__prev, .lightbox__next {
        background: none;
        border: none;
        color: white;
        font-size: 2.5rem;
        cursor: pointer;
    }
    .lightbox__close {
        position: absolute;
        top: 1.5rem;
        right: 2rem;
    }
    .contact__container {
        display: grid;
        grid-template-columns: 1fr 1.4fr;
        gap: 3rem;
    }
    .form__group {
        display: flex;
        flex-direction: column;
        margin-bottom: 1.2rem;
    }
    .form__group input, .form__group select, .form__group textarea {
        padding: 0.8rem;
        border: 1px solid #d8cfc4;
        border-radius: 6px;
        font: inherit;
    }
    .footer {
        padding: 2rem 0;
        background: var(--ink);
        color: #bbb;
        text-align: center;
    }
    .floating-cta {
        position: fixed;
        right: 24px;
        bottom: 24px;
        z-index: 900;
        transition: opacity 0.3s ease;
    }
    .floating-cta a {
        display: inline-block;
        padding: 0.9rem 1.4rem;
        border-radius: 999px;
        background: var(--forest);
        color: white;
        box-shadow: 0 6px 20px rgba(0, 0, 0, 0.2);
        text-decoration: none;
    }
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reveal::stagger_delay;

    #[test]
    fn reveal_index_runs_across_the_whole_page() {
        assert_eq!(reveal_offsets(), [0, 6, 10, 13, 21, 24]);
        // First value card follows the sixth service card: 6 % 4 = 2.
        let [_, values, ..] = reveal_offsets();
        assert!((stagger_delay(values) - 0.2).abs() < 1e-9);
    }
}
