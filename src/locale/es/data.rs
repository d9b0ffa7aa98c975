//! Spanish lexical tables.

pub(super) const DIGITS: &[(&str, &str)] = &[
    ("cero", "0"),
    ("uno", "1"),
    ("una", "1"),
    ("dos", "2"),
    ("tres", "3"),
    ("cuatro", "4"),
    ("cinco", "5"),
    ("seis", "6"),
    ("siete", "7"),
    ("ocho", "8"),
    ("nueve", "9"),
];

pub(super) const UNITS: &[(&str, &str)] = &[
    ("uno", "1"),
    ("un", "1"),
    ("una", "1"),
    ("dos", "2"),
    ("tres", "3"),
    ("cuatro", "4"),
    ("cinco", "5"),
    ("seis", "6"),
    ("siete", "7"),
    ("ocho", "8"),
    ("nueve", "9"),
];

pub(super) const TEENS: &[(&str, &str)] = &[
    ("diez", "10"),
    ("once", "11"),
    ("doce", "12"),
    ("trece", "13"),
    ("catorce", "14"),
    ("quince", "15"),
    ("dieciséis", "16"),
    ("diecisiete", "17"),
    ("dieciocho", "18"),
    ("diecinueve", "19"),
];

pub(super) const TWENTIES: &[(&str, &str)] = &[
    ("veinte", "20"),
    ("veintiuno", "21"),
    ("veintiún", "21"),
    ("veintiuna", "21"),
    ("veintidós", "22"),
    ("veintitrés", "23"),
    ("veinticuatro", "24"),
    ("veinticinco", "25"),
    ("veintiséis", "26"),
    ("veintisiete", "27"),
    ("veintiocho", "28"),
    ("veintinueve", "29"),
];

/// Tens from thirty up; the value is the tens digit.
pub(super) const TENS: &[(&str, &str)] = &[
    ("treinta", "3"),
    ("cuarenta", "4"),
    ("cincuenta", "5"),
    ("sesenta", "6"),
    ("setenta", "7"),
    ("ochenta", "8"),
    ("noventa", "9"),
];

/// Hundreds from one hundred and one up; the value is the hundreds digit.
pub(super) const HUNDREDS: &[(&str, &str)] = &[
    ("ciento", "1"),
    ("doscientos", "2"),
    ("doscientas", "2"),
    ("trescientos", "3"),
    ("trescientas", "3"),
    ("cuatrocientos", "4"),
    ("cuatrocientas", "4"),
    ("quinientos", "5"),
    ("quinientas", "5"),
    ("seiscientos", "6"),
    ("seiscientas", "6"),
    ("setecientos", "7"),
    ("setecientas", "7"),
    ("ochocientos", "8"),
    ("ochocientas", "8"),
    ("novecientos", "9"),
    ("novecientas", "9"),
];

pub(super) const ORDINAL_UNITS_MASCULINE: &[(&str, &str)] = &[
    ("primero", "1"),
    ("primer", "1"),
    ("segundo", "2"),
    ("tercero", "3"),
    ("tercer", "3"),
    ("cuarto", "4"),
    ("quinto", "5"),
    ("sexto", "6"),
    ("séptimo", "7"),
    ("octavo", "8"),
    ("noveno", "9"),
];

pub(super) const ORDINAL_UNITS_FEMININE: &[(&str, &str)] = &[
    ("primera", "1"),
    ("segunda", "2"),
    ("tercera", "3"),
    ("cuarta", "4"),
    ("quinta", "5"),
    ("sexta", "6"),
    ("séptima", "7"),
    ("octava", "8"),
    ("novena", "9"),
];

/// Ordinal tens without their gender ending; the value is the tens digit.
pub(super) const ORDINAL_TEN_STEMS: &[(&str, &str)] = &[
    ("décim", "1"),
    ("vigésim", "2"),
    ("trigésim", "3"),
    ("cuadragésim", "4"),
    ("quincuagésim", "5"),
    ("sexagésim", "6"),
    ("septuagésim", "7"),
    ("octogésim", "8"),
    ("nonagésim", "9"),
];

pub(super) const ORDINAL_IRREGULAR_STEMS: &[(&str, &str)] = &[("undécim", "11"), ("duodécim", "12")];

pub(super) const MONTHS: &[&str] = &[
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

pub(super) const CURRENCIES: &[(&str, &str)] = &[
    ("dólar", "$"),
    ("dólares", "$"),
    ("peso", "$"),
    ("pesos", "$"),
    ("euro", "€"),
    ("euros", "€"),
];

pub(super) const CURRENCY_SYMBOLS: &[char] = &['$', '€'];

pub(super) const MINOR_CURRENCY: &[&str] = &["centavo", "centavos", "céntimo", "céntimos"];

pub(super) const MEASURE_UNITS: &[(&str, &str)] = &[
    ("kilómetros por hora", "km/h"),
    ("kilómetro por hora", "km/h"),
    ("kilómetro", "km"),
    ("kilómetros", "km"),
    ("metro", "m"),
    ("metros", "m"),
    ("centímetro", "cm"),
    ("centímetros", "cm"),
    ("milímetro", "mm"),
    ("milímetros", "mm"),
    ("kilogramo", "kg"),
    ("kilogramos", "kg"),
    ("kilo", "kg"),
    ("kilos", "kg"),
    ("gramo", "g"),
    ("gramos", "g"),
    ("litro", "l"),
    ("litros", "l"),
    ("mililitro", "ml"),
    ("mililitros", "ml"),
    ("por ciento", "%"),
];

pub(super) const WHITELIST: &[(&str, &str)] = &[
    ("señor", "Sr."),
    ("señora", "Sra."),
    ("señorita", "Srta."),
    ("doctor", "Dr."),
    ("doctora", "Dra."),
    ("usted", "Ud."),
    ("ustedes", "Uds."),
    ("licenciado", "Lic."),
];
