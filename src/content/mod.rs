//! Static descriptive text for computed numbers and signs.
//!
//! Presentation content only. Every lookup is total: unknown numbers get a
//! neutral fallback instead of panicking.

use crate::numerology::{ChineseAnimal, Zodiac};

/// Meaning of a life-path number.
#[must_use]
pub const fn life_path_meaning(n: u32) -> &'static str {
    match n {
        1 => "El 1 es el número del liderazgo: independencia, iniciativa y la fuerza para empezar de cero.",
        2 => "El 2 es el número de la cooperación: diplomacia, sensibilidad y talento para unir a las personas.",
        3 => "El 3 es el número de la expresión: creatividad, comunicación y alegría de vivir.",
        4 => "El 4 es el número del orden: disciplina, constancia y bases sólidas para construir.",
        5 => "El 5 es el número de la libertad: cambio, aventura y una curiosidad que no descansa.",
        6 => "El 6 es el número de la armonía: responsabilidad, familia y vocación de cuidar a los demás.",
        7 => "El 7 es el número del análisis: introspección, estudio y búsqueda de la verdad.",
        8 => "El 8 es el número del poder: ambición, organización y éxito material.",
        9 => "El 9 es el número del altruismo: compasión, generosidad y cierre de ciclos.",
        11 => "El 11 es un número maestro: intuición elevada, inspiración y una sensibilidad fuera de lo común.",
        22 => "El 22 es un número maestro: el constructor de grandes proyectos, capaz de volver realidad lo soñado.",
        33 => "El 33 es un número maestro: la entrega al servicio de los demás llevada a su máxima expresión.",
        _ => "Un número fuera del ciclo tradicional; cada camino tiene su propio significado.",
    }
}

/// Guidance attached to the number of the day.
#[must_use]
pub const fn daily_guidance(n: u32) -> &'static str {
    match n {
        1 => "Hoy es un buen día para tomar la iniciativa y empezar algo nuevo.",
        2 => "Hoy conviene escuchar, negociar y buscar acuerdos.",
        3 => "Hoy la energía favorece la comunicación y la creatividad.",
        4 => "Hoy toca organizarse: el trabajo constante rinde frutos.",
        5 => "Hoy es un día de cambios; mantente flexible ante lo inesperado.",
        6 => "Hoy el hogar y los afectos piden tu atención.",
        7 => "Hoy es un día para reflexionar y estudiar antes de decidir.",
        8 => "Hoy los asuntos materiales y de negocios están favorecidos.",
        9 => "Hoy es un día para cerrar pendientes y dejar ir lo que ya cumplió su ciclo.",
        11 => "Hoy tu intuición está especialmente despierta; hazle caso.",
        22 => "Hoy los proyectos ambiciosos encuentran terreno firme.",
        33 => "Hoy ayudar a alguien más te ayudará también a ti.",
        _ => "Hoy es un día como cualquier otro: tú le pones el número.",
    }
}

/// Short blurb for a zodiac sign.
#[must_use]
pub const fn zodiac_blurb(sign: Zodiac) -> &'static str {
    match sign {
        Zodiac::Acuario => "Acuario: original, independiente y siempre un paso adelante de su época.",
        Zodiac::Piscis => "Piscis: soñador, empático y con una imaginación sin orillas.",
        Zodiac::Aries => "Aries: impulsivo, valiente y primero en lanzarse a lo desconocido.",
        Zodiac::Tauro => "Tauro: paciente, leal y amante de los placeres sencillos.",
        Zodiac::Geminis => "Géminis: curioso, versátil y conversador incansable.",
        Zodiac::Cancer => "Cáncer: protector, sensible y muy apegado a los suyos.",
        Zodiac::Leo => "Leo: generoso, orgulloso y nacido para el escenario.",
        Zodiac::Virgo => "Virgo: detallista, práctico y de una lógica impecable.",
        Zodiac::Libra => "Libra: equilibrado, sociable y enemigo de la injusticia.",
        Zodiac::Escorpio => "Escorpio: intenso, reservado y de una voluntad de hierro.",
        Zodiac::Sagitario => "Sagitario: optimista, viajero y filósofo de sobremesa.",
        Zodiac::Capricornio => "Capricornio: ambicioso, prudente y constante hasta la cima.",
    }
}

/// Short blurb for a Chinese zodiac animal.
#[must_use]
pub const fn chinese_blurb(animal: ChineseAnimal) -> &'static str {
    match animal {
        ChineseAnimal::Rata => "La Rata es ingeniosa, adaptable y nunca se queda sin recursos.",
        ChineseAnimal::Buey => "El Buey es trabajador, confiable y de paso firme.",
        ChineseAnimal::Tigre => "El Tigre es valiente, apasionado y de espíritu competitivo.",
        ChineseAnimal::Conejo => "El Conejo es amable, discreto y de trato elegante.",
        ChineseAnimal::Dragon => "El Dragón es carismático, enérgico y de ambiciones grandes.",
        ChineseAnimal::Serpiente => "La Serpiente es sabia, intuitiva y de pocas palabras.",
        ChineseAnimal::Caballo => "El Caballo es libre, entusiasta y siempre en movimiento.",
        ChineseAnimal::Cabra => "La Cabra es creativa, gentil y amante de la paz.",
        ChineseAnimal::Mono => "El Mono es listo, juguetón y de mente rápida.",
        ChineseAnimal::Gallo => "El Gallo es observador, franco y muy trabajador.",
        ChineseAnimal::Perro => "El Perro es leal, honesto y de corazón noble.",
        ChineseAnimal::Cerdo => "El Cerdo es sincero, generoso y de buen vivir.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numerology::{chinese_animal, zodiac_sign};

    #[test]
    fn test_life_path_meaning_total() {
        for n in [1, 2, 3, 4, 5, 6, 7, 8, 9, 11, 22, 33, 0, 10, 99] {
            assert!(!life_path_meaning(n).is_empty());
        }
    }

    #[test]
    fn test_daily_guidance_total() {
        for n in 0..=40 {
            assert!(!daily_guidance(n).is_empty());
        }
    }

    #[test]
    fn test_blurbs_mention_their_subject() {
        let sign = zodiac_sign("21/03/2000".parse().unwrap());
        assert!(zodiac_blurb(sign).contains("Aries"));

        let animal = chinese_animal("01/01/2016".parse().unwrap());
        assert!(chinese_blurb(animal).contains("Mono"));
    }
}
