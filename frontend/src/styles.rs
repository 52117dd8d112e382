pub const CONTAINER: &str = "min-h-screen bg-gray-50 dark:bg-gray-900 w-full px-4 sm:px-6 lg:px-8";
pub const MAIN: &str = "max-w-3xl mx-auto pt-20 pb-12";
pub const CENTERED: &str = "min-h-screen flex flex-col items-center justify-center";
pub const NAV: &str = "fixed top-0 z-50 w-full bg-white/60 dark:bg-gray-700/60 backdrop-blur-md border-b border-gray-200/50 dark:border-gray-700/50";
pub const NAV_CONTENT: &str = "h-16 px-4 sm:px-6 lg:px-8 flex items-center justify-between";
pub const NAV_BRAND: &str = "flex items-center text-xl font-bold text-gray-900 dark:text-white";
pub const CARD: &str = "bg-white dark:bg-gray-800 rounded-lg shadow-lg dark:shadow-[0_4px_12px_-4px_rgba(255,255,255,0.03)] p-6 my-4";
pub const BUTTON_PRIMARY: &str = "inline-flex items-center justify-center px-4 py-2 rounded-lg font-medium text-white bg-gradient-to-r from-blue-600 to-blue-700 hover:from-blue-700 hover:to-blue-800 shadow-lg disabled:opacity-50 transition-all duration-300";
pub const BUTTON_SECONDARY: &str = "inline-flex items-center justify-center px-4 py-2 rounded-lg font-medium border border-gray-300 dark:border-gray-600 text-gray-900 dark:text-white hover:bg-gray-50 dark:hover:bg-gray-800";
pub const INPUT: &str = "mt-2 block w-full rounded-lg border-0 bg-white dark:bg-gray-900 py-2 px-3 text-gray-900 dark:text-white shadow-sm ring-1 ring-inset ring-gray-300 dark:ring-gray-700 placeholder:text-gray-400 focus:ring-2 focus:ring-blue-600";
pub const FORM: &str = "mt-4 space-y-4";
pub const DIVIDER: &str = "my-4 border-gray-200 dark:border-gray-700";
pub const TEXT_H2: &str = "text-2xl font-bold text-gray-900 dark:text-white";
pub const TEXT_H3: &str = "text-xl font-bold text-gray-900 dark:text-white";
pub const TEXT_LARGE: &str = "text-lg text-gray-900 dark:text-white";
pub const TEXT_BODY: &str = "text-gray-600 dark:text-gray-300";
pub const TEXT_SMALL: &str = "text-sm text-gray-500 dark:text-gray-400";
pub const TEXT_ERROR: &str = "text-sm text-red-500 dark:text-red-400";
pub const TEXT_LABEL: &str = "block text-sm font-medium text-gray-900 dark:text-white";
pub const TEXT_HINT: &str = "text-xs text-gray-500 dark:text-gray-400 mt-1";
pub const PRE: &str = "mt-4 p-4 rounded-lg bg-gray-100 dark:bg-gray-900 text-sm text-gray-800 dark:text-gray-200 overflow-x-auto";
pub const SPINNER: &str = "h-10 w-10 animate-spin rounded-full border-4 border-blue-600 border-t-transparent";
